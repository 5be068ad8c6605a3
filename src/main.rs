use buoycast::{
    configure_table_display, BuoycastError, ClientConfig, Prompter, StationRegistry, SurfReporter,
};
use chrono::Utc;
use std::io;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), BuoycastError> {
    env_logger::init();
    configure_table_display();

    let registry = StationRegistry::default();
    let (station_id, location) = {
        let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
        let station_id = prompter.station_id()?;
        (station_id, prompter.location(&registry, station_id)?)
    };

    let reporter = SurfReporter::new(ClientConfig::from_env());
    let report = reporter.run(station_id, location, Utc::now()).await;
    print!("{}", report.render());

    Ok(())
}
