pub mod mock_http_client;
pub mod mock_server;
