use std::num::ParseIntError;
use std::path::PathBuf;

use clap::{
    App,
    Arg,
    ArgMatches,
};

use crate::storage::STORAGE_DIR;

pub struct Settings {
    pub host: String,
    pub port: u16,
    pub dir: PathBuf,
}

const BIND_HOST: &str  = "0.0.0.0";
const BIND_PORT: u16 = 8000;

impl Settings {

    pub fn new() -> Settings {
        Settings {
            host: BIND_HOST.to_string(),
            port: BIND_PORT,
            dir: PathBuf::from(STORAGE_DIR),
        }
    }

    fn bind_from_args(&mut self, arg: &ArgMatches) -> Result<(), ParseIntError> {
        match arg.value_of("host") {
            Some(v) => {
                self.host = v.to_string();
            },
            _ => {},
        };

        match arg.value_of("port") {
            Some(v) => {
                self.port = u16::from_str_radix(&v, 10)?;
            },
            _ => {},
        };

        match arg.value_of("dir") {
            Some(v) => {
                self.dir = PathBuf::from(v);
            },
            _ => {},
        };
        Ok(())
    }

    fn app() -> App<'static, 'static> {
        let mut o = App::new("filestore");
        o = o.version(env!("CARGO_PKG_VERSION"));
        o = o.arg(
            Arg::with_name("host")
                .long("host")
                .short("h")
                .value_name("Host or ip to bind server to.")
                .takes_value(true)
                );
        o = o.arg(
            Arg::with_name("port")
                .long("port")
                .short("p")
                .value_name("Port to bind server to")
                .takes_value(true)
                );
        o = o.arg(
            Arg::with_name("dir")
                .long("dir")
                .short("d")
                .value_name("Directory to store files in")
                .takes_value(true)
                );
        o
    }

    pub fn from_args() -> Result<Settings, ParseIntError> {
        let arg_matches = Settings::app().get_matches();
        let mut settings = Settings::new();
        settings.bind_from_args(&arg_matches)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use super::Settings;

    #[test]
    fn test_defaults() {
        let m = Settings::app().get_matches_from(vec!("filestore"));
        let mut settings = Settings::new();
        settings.bind_from_args(&m).unwrap();
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.dir, PathBuf::from("uploads"));
    }

    #[test]
    fn test_overrides() {
        let m = Settings::app().get_matches_from(vec!("filestore", "-p", "8080", "--dir", "/tmp/files", "--host", "127.0.0.1"));
        let mut settings = Settings::new();
        settings.bind_from_args(&m).unwrap();
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.dir, PathBuf::from("/tmp/files"));
    }

    #[test]
    fn test_bad_port() {
        let m = Settings::app().get_matches_from(vec!("filestore", "--port", "eighty"));
        let mut settings = Settings::new();
        assert!(settings.bind_from_args(&m).is_err());
    }
}
