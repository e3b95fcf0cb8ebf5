#[tokio::main]
async fn main() -> anyhow::Result<()> {
    playground_lib::run().await
}
