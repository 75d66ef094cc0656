use chat_completion::cli::Args;
use clap::Parser;
use dotenv::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();
    let args = Args::parse();
    let default_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match chat_completion::run(args).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
