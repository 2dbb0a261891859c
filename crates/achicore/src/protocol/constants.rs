//! Protocol constants

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default HTTP/socket port of the game server
pub const DEFAULT_PORT: u16 = 7350;

/// Default server key used for HTTP basic auth on authentication calls
pub const DEFAULT_SERVER_KEY: &str = "defaultkey";

/// Device authentication endpoint
pub const DEVICE_AUTH_PATH: &str = "/v2/account/authenticate/device";

/// Realtime socket endpoint
pub const SOCKET_PATH: &str = "/ws";

/// Language hint sent when opening the realtime socket
pub const SOCKET_LANG: &str = "en";
