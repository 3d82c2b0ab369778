#[tokio::main]
async fn main() -> anyhow::Result<()> {
    crumbs_lib::run().await
}
