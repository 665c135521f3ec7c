use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cpic_data::cli::run().await
}
