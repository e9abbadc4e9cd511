use craftcon::client::Client;
use log::{info, Level, Metadata, Record};
use std::env;
use std::error::Error;
use std::process;

struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = log::set_logger(&SimpleLogger).map(|()| log::set_max_level(log::LevelFilter::Info));

    let mut args = env::args().skip(1);
    let (host, password) = match (args.next(), args.next()) {
        (Some(host), Some(password)) => (host, password),
        _ => {
            eprintln!("usage: craftcon <host:port> <password> [command [args...]]");
            process::exit(2);
        }
    };
    let command_line: Vec<String> = args.collect();

    let mut client = Client::connect(&host).await?;
    client.login(&password).await?;
    info!("logged in to {}", host);

    if let Some((command, arguments)) = command_line.split_first() {
        let arguments: Vec<&str> = arguments.iter().map(String::as_str).collect();
        let response = client.run(command, &arguments).await?;
        println!("{}", response);
    }

    Ok(())
}
