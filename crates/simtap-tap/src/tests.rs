#[cfg(test)]
mod tests {
    use crate::client::{TapClient, TapOptions};
    use crate::messages::{FieldKind, SyncRequest, TapTable};
    use crate::response::{decode_json, extract_query_status, snippet};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Form, Router};
    use simtap_core::error::SimtapError;
    use simtap_core::service::QueryService;
    use simtap_core::types::DataValue;
    use std::collections::HashMap;
    use std::time::Duration;

    const CROSSMATCH_JSON: &str = r#"{
        "metadata": [
            {"name": "main_id", "datatype": "char", "arraysize": "*", "description": "Main identifier for an object"},
            {"name": "gaia_id", "datatype": "char", "arraysize": "*"},
            {"name": "teff", "datatype": "double", "unit": "K"},
            {"name": "feh_oid", "datatype": "long"},
            {"name": "flag", "datatype": "boolean"}
        ],
        "data": [
            ["* alf Cen A", "Gaia DR3 5853498713190525696", 5790.0, 1234, true],
            ["* alf Cen A", "Gaia DR3 5853498713190525696", null, "1235", null]
        ]
    }"#;

    const ERROR_VOTABLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<VOTABLE version="1.3" xmlns="http://www.ivoa.net/xml/VOTable/v1.3">
  <RESOURCE type="results">
    <INFO name="QUERY_STATUS" value="ERROR">
      Incorrect ADQL query: Encountered "FORM" &lt;IDENTIFIER&gt;.
    </INFO>
  </RESOURCE>
</VOTABLE>"#;

    async fn spawn_tap() -> String {
        let app = Router::new().route(
            "/tap/sync",
            post(|Form(params): Form<HashMap<String, String>>| async move {
                let well_formed = params.get("REQUEST").map(String::as_str) == Some("doQuery")
                    && params.get("LANG").map(String::as_str) == Some("ADQL")
                    && params.get("FORMAT").map(String::as_str) == Some("json");
                if !well_formed {
                    return (StatusCode::BAD_REQUEST, "bad parameters".to_string());
                }
                let query = params.get("QUERY").cloned().unwrap_or_default();
                if query.contains("FORM") {
                    (StatusCode::BAD_REQUEST, ERROR_VOTABLE.to_string())
                } else if query.contains("garbage") {
                    (StatusCode::OK, "not json".to_string())
                } else {
                    (StatusCode::OK, CROSSMATCH_JSON.to_string())
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{addr}/tap/")
    }

    fn client(base_url: String) -> TapClient {
        TapClient::new(TapOptions {
            base_url,
            timeout: Duration::from_secs(5),
            ..TapOptions::default()
        })
        .expect("client")
    }

    #[test]
    fn decode_maps_votable_datatypes() {
        let result = decode_json(CROSSMATCH_JSON).expect("decode");
        assert_eq!(
            result.column_names(),
            vec!["main_id", "gaia_id", "teff", "feh_oid", "flag"]
        );
        assert_eq!(
            result.columns[0].description.as_deref(),
            Some("Main identifier for an object")
        );
        assert_eq!(result.columns[2].data_type, "double");
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].values[2], DataValue::Float64(5790.0));
        assert_eq!(result.rows[0].values[3], DataValue::Int64(1234));
        assert_eq!(result.rows[0].values[4], DataValue::Bool(true));
        assert_eq!(result.rows[1].values[2], DataValue::Null);
        assert_eq!(result.rows[1].values[3], DataValue::Int64(1235));
        assert_eq!(result.rows[1].values[4], DataValue::Null);
    }

    #[test]
    fn decode_pads_short_records() {
        let body = r#"{"metadata":[{"name":"a","datatype":"int"},{"name":"b","datatype":"char"}],"data":[[1]]}"#;
        let result = decode_json(body).expect("decode");
        assert_eq!(result.rows[0].values, vec![DataValue::Int64(1), DataValue::Null]);
    }

    #[test]
    fn decode_without_rows_keeps_schema() {
        let body = r#"{"metadata":[{"name":"oidref","datatype":"long"}],"data":[]}"#;
        let result = decode_json(body).expect("decode");
        assert!(result.is_empty());
        assert_eq!(result.column_names(), vec!["oidref"]);
    }

    #[test]
    fn field_kind_treats_arrays_as_text() {
        let table: TapTable = serde_json::from_str(
            r#"{"metadata":[{"name":"v","datatype":"double","arraysize":"2"},{"name":"w"}]}"#,
        )
        .expect("json");
        assert_eq!(table.metadata[0].kind(), FieldKind::Text);
        assert_eq!(table.metadata[1].kind(), FieldKind::Text);
        assert_eq!(table.metadata[1].data_type(), "char");
    }

    #[test]
    fn query_status_message_is_extracted() {
        assert_eq!(
            extract_query_status(ERROR_VOTABLE).as_deref(),
            Some("Incorrect ADQL query: Encountered \"FORM\" <IDENTIFIER>.")
        );
        assert_eq!(extract_query_status("{}"), None);
        let err = decode_json(ERROR_VOTABLE).expect_err("not json");
        assert!(err.to_string().contains("Incorrect ADQL query"));
    }

    #[test]
    fn snippet_flattens_and_truncates() {
        assert_eq!(snippet("a\n  b\tc"), "a b c");
        let long = "x".repeat(500);
        assert_eq!(snippet(&long).len(), 203);
    }

    #[test]
    fn sync_request_form_fields() {
        let mut request = SyncRequest::new("SELECT 1");
        request.max_records = Some(10);
        let fields = request.form_fields();
        assert_eq!(fields[0], ("REQUEST", "doQuery".to_string()));
        assert_eq!(fields[3], ("QUERY", "SELECT 1".to_string()));
        assert_eq!(fields[4], ("MAXREC", "10".to_string()));
    }

    #[test]
    fn sync_url_joins_base() {
        assert_eq!(
            client("http://example.org/tap/".into()).sync_url(),
            "http://example.org/tap/sync"
        );
    }

    #[tokio::test]
    async fn client_round_trip_against_local_service() {
        let service = client(spawn_tap().await);
        let result = service
            .execute_query("SELECT main_id FROM basic")
            .await
            .expect("query");
        assert_eq!(result.len(), 2);
        assert_eq!(
            result.rows[0].values[0],
            DataValue::String("* alf Cen A".into())
        );
    }

    #[tokio::test]
    async fn client_reports_tap_errors() {
        let service = client(spawn_tap().await);
        let err = service
            .execute_query("SELECT * FORM basic")
            .await
            .expect_err("tap error");
        match err {
            SimtapError::QueryService(message) => {
                assert!(message.contains("400"), "{message}");
                assert!(message.contains("Incorrect ADQL query"), "{message}");
            }
            other => panic!("unexpected error {other:?}"),
        }

        let err = service
            .execute_query("SELECT garbage")
            .await
            .expect_err("bad body");
        assert!(matches!(err, SimtapError::QueryService(_)));
    }

    #[tokio::test]
    async fn client_reports_unreachable_service() {
        let service = client("http://127.0.0.1:1/tap".into());
        let err = service.execute_query("SELECT 1").await.expect_err("refused");
        assert!(matches!(err, SimtapError::QueryService(_)));
    }
}
