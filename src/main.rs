#[tokio::main]
async fn main() {
    if let Err(err) = zohodesk_mcp::mcp::server::run_stdio().await {
        eprintln!("zohodesk-mcp: {}", err);
        std::process::exit(1);
    }
}
