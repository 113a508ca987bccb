use anyhow::Context;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    moldtrack_server::run().await.context("server terminated abnormally")
}
