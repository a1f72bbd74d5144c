#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pptx_templater_server::run().await
}
