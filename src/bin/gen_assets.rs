use clap::Parser;
use fortune_server::core::assets::{default_assets, encode_png, render};
use fortune_server::core::Storage;
use fortune_server::utils::logger;
use fortune_server::LocalStorage;

#[derive(Parser)]
#[command(name = "gen_assets")]
#[command(about = "Render the placeholder PNGs used by the game front end")]
struct Args {
    /// Directory the images are written to
    #[arg(short, long, default_value = "static/assets")]
    out_dir: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_logger(args.verbose, false);

    tracing::info!("🎨 Rendering placeholder assets into {}", args.out_dir);

    let storage = LocalStorage::new(args.out_dir.clone());

    for spec in default_assets() {
        let image = render(&spec);
        let png = encode_png(&image)?;
        storage.write_file(spec.file_name, &png).await?;
        tracing::info!("✅ {} ({}x{}, {} bytes)", spec.file_name, spec.size, spec.size, png.len());
    }

    println!("✅ Assets written to {}", storage.base_path());
    Ok(())
}
