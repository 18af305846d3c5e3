use blogdesk::{config::Config, seed::PersistMode};

fn print_usage_and_exit() -> ! {
    eprintln!("Usage: seed [--incremental]");
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let mut args = std::env::args().skip(1); // 跳过程序名

    let mode = match args.next().as_deref() {
        None => PersistMode::ResetAll,
        Some("--incremental") => PersistMode::Incremental,
        Some(other) => {
            eprintln!("Unknown argument: {}", other);
            print_usage_and_exit();
        }
    };

    if args.next().is_some() {
        eprintln!("Too many arguments provided.");
        print_usage_and_exit();
    }

    blogdesk::init_tracing();

    let config = Config::from_env();
    if config.database_url.is_none() {
        println!("ℹ️ DATABASE_URL not set, the in-memory store is seeded by the server on start");
        return;
    }

    let result = async {
        let backend = blogdesk::connect_backend(&config).await?;
        let catalogue = blogdesk::load_catalogue(&config)?;
        backend.seed(&catalogue, mode).await?;
        Ok::<_, blogdesk::error::Error>(catalogue)
    }
    .await;

    match result {
        Ok(catalogue) => {
            println!(
                "✅ Seeded {} categories and {} posts",
                catalogue.categories.len(),
                catalogue.items.len()
            );
        }
        Err(e) => {
            eprintln!("❌ Seed failed: {}", e);
            std::process::exit(1);
        }
    }
}
