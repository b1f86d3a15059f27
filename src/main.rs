#[actix_web::main]
async fn main() -> std::io::Result<()> {
    forecast_prep_lib::run().await
}
