use crate::messages::PONG;

/// Liveness check shared by every FileDrop surface
///
/// The reply is a fixed text. Clients treat anything else as a misbehaving server, so this
/// carries no status detail.
#[derive(Clone, Debug, Default)]
pub struct PingService;

impl PingService {
    /// Creates a new instance of PingService.
    pub fn new() -> Self {
        Self
    }

    /// Static method to answer a ping without creating an instance
    ///
    /// # Returns
    /// The fixed `PONG!!!` reply, including its trailing newline.
    pub fn pong() -> &'static str {
        PONG
    }
}
