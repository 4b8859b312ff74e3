#[tokio::main]
async fn main() {
    campdir_be::start_server().await;
}
