#[cfg(test)]
mod tests {
    use crate::commands::{arrange, crossmatch, CrossmatchArgs, OutputArgs};
    use crate::config::Config;
    use crate::output::{write_result, OutputFormat};
    use async_trait::async_trait;
    use simtap_core::error::SimtapError;
    use simtap_core::service::QueryService;
    use simtap_core::types::{Column, DataRow, DataValue, TabularResult};
    use std::io::Write;

    struct FakeSimbad;

    #[async_trait]
    impl QueryService for FakeSimbad {
        async fn execute_query(&self, query: &str) -> Result<TabularResult, SimtapError> {
            let columns = vec![Column::new("main_id", "char"), Column::new("gaia_id", "char"), Column::new("sptype", "char")];
            let row = |sptype: &str| {
                DataRow::new(vec![
                    DataValue::String("* alf Cen A".into()),
                    DataValue::String("Gaia DR3 111".into()),
                    DataValue::String(sptype.into()),
                ])
            };
            if query.contains("'Gaia DR3 111'") {
                Ok(TabularResult::new(columns, vec![row("G2V"), row("G2V"), row("G2IV")]))
            } else {
                Err(SimtapError::QueryService("HTTP 503 Service Unavailable".into()))
            }
        }
    }

    fn sample() -> TabularResult {
        TabularResult::new(
            vec![Column::new("main_id", "char"), Column::new("gaia_id", "char"), Column::new("teff", "double")],
            vec![
                DataRow::new(vec![
                    DataValue::String("* a".into()),
                    DataValue::String("G1".into()),
                    DataValue::Float64(5000.0),
                ]),
                DataRow::new(vec![
                    DataValue::String("* a".into()),
                    DataValue::String("G1".into()),
                    DataValue::Null,
                ]),
            ],
        )
    }

    #[test]
    fn config_defaults_apply_to_missing_sections() {
        let config = Config::parse("[crossmatch]\njoin_key = \"main_id\"\n").expect("config");
        assert_eq!(config.crossmatch.join_key, "main_id");
        assert_eq!(config.crossmatch.id_prefix, "Gaia DR3 ");
        assert_eq!(config.crossmatch.id_column, "source_id");
        assert_eq!(config.service.base_url, "http://simbad.u-strasbg.fr/simbad/sim-tap");
        assert_eq!(config.service.timeout_secs, 60);
        assert_eq!(config.log_level().expect("level"), tracing::Level::INFO);
    }

    #[test]
    fn config_validation_rejects_bad_values() {
        assert!(Config::parse("[service]\ntimeout_secs = 0\n").is_err());
        assert!(Config::parse("[service]\nbase_url = \"ftp://x\"\n").is_err());
        assert!(Config::parse("[crossmatch]\njoin_key = \"\"\n").is_err());
        assert!(Config::parse("[logging]\nlevel = \"loud\"\n").is_err());
        assert!(Config::parse("[service\n").is_err());

        let err = Config::parse("[service]\nbase_url = \"ftp://x\"\n").expect_err("scheme");
        assert_eq!(err.to_string(), "service.base_url must be an http(s) URL: ftp://x");
        let err = Config::parse("[logging]\nlevel = \"loud\"\n").expect_err("level");
        assert_eq!(err.to_string(), "unknown log level: loud");
    }

    #[test]
    fn config_loads_from_file_and_maps_tap_options() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            "[service]\nbase_url = \"https://example.org/tap\"\ntimeout_secs = 5\nmax_records = 100\n"
        )
        .expect("write");
        let config = Config::from_path(file.path()).expect("config");
        let options = config.tap_options();
        assert_eq!(options.base_url, "https://example.org/tap");
        assert_eq!(options.timeout.as_secs(), 5);
        assert_eq!(options.max_records, Some(100));
    }

    #[test]
    fn tsv_output_renders_lists() {
        let grouped = arrange(sample(), "gaia_id", true).expect("arrange");
        let mut buf = Vec::new();
        write_result(&mut buf, &grouped, OutputFormat::Tsv).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text, "gaia_id\tmain_id\tteff\nG1\t* a\t[5000, ]\n");
    }

    #[test]
    fn json_output_keeps_column_order() {
        let mut buf = Vec::new();
        write_result(&mut buf, &sample(), OutputFormat::Json).expect("write");
        let doc: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        let records = doc.as_array().expect("array of records");
        assert_eq!(records.len(), 2);
        let keys: Vec<&str> = records[0]
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["main_id", "gaia_id", "teff"]);
        assert_eq!(records[0]["teff"], serde_json::json!(5000.0));
        assert_eq!(records[0]["gaia_id"], "G1");
        assert!(records[1]["teff"].is_null());
    }

    #[test]
    fn arrange_without_grouping_moves_key_first() {
        let out = arrange(sample(), "gaia_id", false).expect("arrange");
        assert_eq!(out.column_names(), vec!["gaia_id", "main_id", "teff"]);
        assert_eq!(out.len(), 2);
        assert!(arrange(TabularResult::empty(), "gaia_id", true).expect("empty").is_empty());
        assert!(arrange(sample(), "source_id", true).is_err());
    }

    #[tokio::test]
    async fn crossmatch_writes_grouped_result() {
        let dir = tempfile::tempdir().expect("tempdir");
        let targets = dir.path().join("targets.txt");
        std::fs::write(&targets, "source_id ra\n111 1.0\n222 2.0\n").expect("targets");
        let output = dir.path().join("out.json");

        let args = CrossmatchArgs {
            targets,
            column: None,
            prefix: None,
            group_by: None,
            no_group: false,
            output: OutputArgs {
                format: OutputFormat::Json,
                output: Some(output.clone()),
            },
        };
        crossmatch(&FakeSimbad, &Config::default(), args)
            .await
            .expect("crossmatch");

        let doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).expect("read")).expect("json");
        let records = doc.as_array().expect("array of records");
        assert_eq!(records.len(), 1);
        let record = records[0].as_object().expect("object");
        assert_eq!(record.keys().next().map(String::as_str), Some("gaia_id"));
        assert_eq!(record["gaia_id"], "Gaia DR3 111");
        assert_eq!(record["sptype"], serde_json::json!(["G2V", "G2V", "G2IV"]));
    }
}
