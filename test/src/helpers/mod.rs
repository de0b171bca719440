pub mod assertions;
pub mod test_session;

pub use test_session::{PeerLog, TestClient, TestSession};
