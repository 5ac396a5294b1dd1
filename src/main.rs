use appointment_forecast::args::PredictArgs;
use appointment_forecast::config::ForecastConfig;
use appointment_forecast::logging::init_logging;
use appointment_forecast::output;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match PredictArgs::parse(std::env::args_os().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            println!("{}", output::error_document(&e.to_string()));
            return ExitCode::FAILURE;
        }
    };

    // a missing .env file is fine
    let _ = dotenvy::dotenv();
    let config = ForecastConfig::from_env();

    if let Err(e) = init_logging(config.log_level) {
        eprintln!("{:#}", e);
    }

    let now = chrono::Local::now().naive_local();
    let result = appointment_forecast::run(&args, &config, now).await;

    match output::render(&result) {
        Ok(line) => {
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", output::error_document(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}
