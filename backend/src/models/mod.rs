pub mod favorite;
pub mod geo;
pub mod macros;
pub mod posture;
pub mod session;
pub mod settings;
pub mod shelter;
pub mod weather;

pub use favorite::*;
pub use geo::*;
pub use posture::*;
pub use session::*;
pub use settings::*;
pub use shelter::*;
pub use weather::*;
