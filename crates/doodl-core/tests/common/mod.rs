#[allow(dead_code)]
pub mod embed_server;
