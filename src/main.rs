use tracing::{error, info, Level};

use usdfc_etl::{
    configuration::{
        get_configuration, set_configuration, AppState, Config, State,
    },
    dao::Database,
    error::Error,
    provider::EventFeed,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(Level::INFO)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = init()?;
    let state = State::new(config)?;
    let app_state = AppState::new(state);

    let mut db = Database::new();
    let feed = EventFeed::new(app_state.clone());
    let summary = feed.run(&mut db).await?;

    info!(
        applied = summary.applied,
        skipped = summary.skipped,
        accounts = db.account.len(),
        transactions = db.transaction.len(),
        troves = db.trove.len(),
        "aggregation complete",
    );

    Ok(())
}

fn init() -> Result<Config, Error> {
    set_configuration()?;
    get_configuration()
}
