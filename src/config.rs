use std::convert::TryInto;
use std::ffi::OsStr;
use std::fs::File;

use justconfig::item::ValueExtractor;
use justconfig::processors::Trim;
use justconfig::sources::env::Env;
use justconfig::sources::text::ConfigText;
use justconfig::ConfPath;
use justconfig::Config;

use crate::catalog::AttributeSchema;
use crate::config_processors::Unquote;

// Set some default values
const DEFAULT_MAX_CATALOG_ROWS: usize = 10_000;
const DEFAULT_NUM_ITEMS_TO_RECOMMEND: usize = 5;
const DEFAULT_EVAL_SAMPLE_SIZE: usize = 1_000;
const DEFAULT_FEATURE_COLUMNS: &str = "Sub Section name,COLOR,SIZE,STYLE,FABRIC";
const DEFAULT_NAME_COLUMN: &str = "Sub Section name";
const DEFAULT_DIVERSIFY_COLUMNS: &str = "COLOR,STYLE,FABRIC";

pub struct AppConfig {
    pub server: ServerConfig,
    pub log: LogConfig,
    pub data: DataConfig,
    pub model: ModelConfig,
    pub eval: EvalConfig,
}

pub struct ServerConfig {
    pub host: String,
    pub port: usize,
    pub num_workers: usize,
}

pub struct LogConfig {
    pub level: String,
}

pub struct DataConfig {
    pub catalog_path: String,
    pub max_catalog_rows: usize,
}

pub struct ModelConfig {
    pub num_items_to_recommend: usize,
    pub feature_columns: Vec<String>,
    pub name_column: String,
    pub diversify_columns: Vec<String>,
}

pub struct EvalConfig {
    pub sample_size: usize,
}

impl AppConfig {
    pub fn new(config_path: String) -> AppConfig {
        // Initialize config object
        let mut conf = Config::default();

        // Check if there is a config file
        if let Ok(config_file) = File::open(&config_path) {
            let config_text = ConfigText::new(config_file, &config_path)
                .expect("Loading configuration file failed.");
            conf.add_source(config_text);
        }

        // Define config params from environment variables
        let config_env = Env::new(&[
            (
                ConfPath::from(&["data", "catalog_path"]),
                OsStr::new("CATALOG_DATA"),
            ),
            (
                ConfPath::from(&["server", "num_workers"]),
                OsStr::new("NUM_WORKERS"),
            ),
        ]);
        conf.add_source(config_env);

        // Parse into custom config struct
        AppConfig::parse(conf)
    }

    fn parse(conf: justconfig::Config) -> AppConfig {
        AppConfig {
            server: ServerConfig::parse(&conf, ConfPath::from(&["server"])),
            log: LogConfig::parse(&conf, ConfPath::from(&["log"])),
            data: DataConfig::parse(&conf, ConfPath::from(&["data"])),
            model: ModelConfig::parse(&conf, ConfPath::from(&["model"])),
            eval: EvalConfig::parse(&conf, ConfPath::from(&["eval"])),
        }
    }
}

impl ServerConfig {
    fn parse(conf: &Config, path: ConfPath) -> ServerConfig {
        ServerConfig {
            host: conf
                .get(path.push("host"))
                .unquote()
                .value()
                .unwrap_or_else(|_| String::from("0.0.0.0")),
            port: conf.get(path.push("port")).trim().value().unwrap_or(8080),
            num_workers: conf
                .get(path.push("num_workers"))
                .trim()
                .value()
                // Detect number of CPUs
                .unwrap_or_else(|_| sys_info::cpu_num().unwrap_or_default().try_into().unwrap()),
        }
    }
}

impl LogConfig {
    fn parse(conf: &Config, path: ConfPath) -> LogConfig {
        LogConfig {
            level: conf
                .get(path.push("level"))
                .unquote()
                .value()
                .unwrap_or_default(),
        }
    }
}

impl DataConfig {
    fn parse(conf: &Config, path: ConfPath) -> DataConfig {
        DataConfig {
            catalog_path: conf
                .get(path.push("catalog_path"))
                .unquote()
                .value()
                .unwrap(),
            max_catalog_rows: conf
                .get(path.push("max_catalog_rows"))
                .trim()
                .value()
                .unwrap_or(DEFAULT_MAX_CATALOG_ROWS),
        }
    }
}

impl ModelConfig {
    fn parse(conf: &Config, path: ConfPath) -> ModelConfig {
        ModelConfig {
            num_items_to_recommend: conf
                .get(path.push("num_items_to_recommend"))
                .trim()
                .value()
                .unwrap_or(DEFAULT_NUM_ITEMS_TO_RECOMMEND),
            feature_columns: split_columns(
                &conf
                    .get(path.push("feature_columns"))
                    .unquote()
                    .value()
                    .unwrap_or_else(|_| String::from(DEFAULT_FEATURE_COLUMNS)),
            ),
            name_column: conf
                .get(path.push("name_column"))
                .unquote()
                .value()
                .unwrap_or_else(|_| String::from(DEFAULT_NAME_COLUMN)),
            diversify_columns: split_columns(
                &conf
                    .get(path.push("diversify_columns"))
                    .unquote()
                    .value()
                    .unwrap_or_else(|_| String::from(DEFAULT_DIVERSIFY_COLUMNS)),
            ),
        }
    }

    pub fn schema(&self) -> anyhow::Result<AttributeSchema> {
        AttributeSchema::new(
            self.feature_columns.clone(),
            &self.name_column,
            &self.diversify_columns,
        )
    }
}

impl EvalConfig {
    fn parse(conf: &Config, path: ConfPath) -> EvalConfig {
        EvalConfig {
            sample_size: conf
                .get(path.push("sample_size"))
                .trim()
                .value()
                .unwrap_or(DEFAULT_EVAL_SAMPLE_SIZE),
        }
    }
}

fn split_columns(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|column| column.trim().to_string())
        .filter(|column| !column.is_empty())
        .collect()
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn should_split_comma_separated_column_lists() {
        let columns = split_columns("Sub Section name, COLOR ,STYLE,");

        assert_eq!(
            vec![
                "Sub Section name".to_string(),
                "COLOR".to_string(),
                "STYLE".to_string()
            ],
            columns
        );
    }

    #[test]
    fn should_produce_a_valid_default_schema() {
        let model = ModelConfig {
            num_items_to_recommend: DEFAULT_NUM_ITEMS_TO_RECOMMEND,
            feature_columns: split_columns(DEFAULT_FEATURE_COLUMNS),
            name_column: DEFAULT_NAME_COLUMN.to_string(),
            diversify_columns: split_columns(DEFAULT_DIVERSIFY_COLUMNS),
        };

        let schema = model.schema().unwrap();
        assert_eq!(5, schema.feature_columns().len());
        assert_eq!(0, schema.name_index());
        assert_eq!(3, schema.diversify_indices().len());
    }
}
