pub mod blueprint;
pub mod infoset;
pub mod path;
pub mod regret;
pub mod trainer;

pub use blueprint::Blueprint;
pub use infoset::InfoSetKey;
pub use path::Path;
pub use regret::{RegretEntry, RegretTable};
pub use trainer::Trainer;
