use kitchen_dispatch::IngestionError;
use kitchen_dispatch::driver::{load_couriers, load_orders};
use kitchen_dispatch::{DispatchConfig, DispatchError, Driver};
use std::io::Write;
use tempfile::NamedTempFile;

#[cfg(test)]
mod tests {
    use super::*;

    fn json_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_orders_reads_camel_case_fields() {
        let file = json_file(
            r#"[
                {"id": "a1", "name": "Banana Split", "prepTime": 4},
                {"id": "a2", "name": "Kale Salad", "prepTime": 9}
            ]"#,
        );

        let orders = load_orders(file.path()).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, "a1");
        assert_eq!(orders[0].name, "Banana Split");
        assert_eq!(orders[1].prep_time, 9);
        assert!(orders[1].ready_at.is_none());
    }

    #[test]
    fn test_load_couriers_reads_camel_case_fields() {
        let file = json_file(r#"[{"name": "Ana", "arrivalTime": 3}, {"name": "Bo", "arrivalTime": -1}]"#);

        let couriers = load_couriers(file.path()).unwrap();
        assert_eq!(couriers.len(), 2);
        assert_eq!(couriers[0].name, "Ana");
        assert_eq!(couriers[0].arrival_time, 3);
        assert_eq!(couriers[1].arrival_time, -1);
    }

    #[test]
    fn test_empty_array_is_valid() {
        let file = json_file("[]");
        assert!(load_orders(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = load_orders(&path).unwrap_err();
        match &err {
            IngestionError::Read { path: reported, .. } => assert_eq!(reported, &path),
            other => panic!("expected read error, got {other:?}"),
        }
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_malformed_json_is_malformed_error() {
        let file = json_file(r#"[{"id": "a1", "name": "Soup"}]"#);

        let err = load_orders(file.path()).unwrap_err();
        assert!(matches!(err, IngestionError::Malformed { .. }));
        assert!(err.to_string().starts_with("malformed records in"));
    }

    #[test]
    fn test_wrong_field_type_is_malformed_error() {
        let file = json_file(r#"[{"name": "Ana", "arrivalTime": "soon"}]"#);
        assert!(matches!(
            load_couriers(file.path()),
            Err(IngestionError::Malformed { .. })
        ));
    }

    #[test]
    fn test_driver_load_inputs_uses_configured_paths() {
        let orders = json_file(r#"[{"id": "a1", "name": "Soup", "prepTime": 1}]"#);
        let couriers = json_file(r#"[{"name": "Ana", "arrivalTime": 1}]"#);
        let mut config = DispatchConfig::default();
        config.orders_path = orders.path().to_path_buf();
        config.couriers_path = couriers.path().to_path_buf();

        let (orders, couriers) = Driver::new(config).load_inputs().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(couriers.len(), 1);
    }

    #[test]
    fn test_driver_load_inputs_surfaces_ingestion_error() {
        let couriers = json_file("not json");
        let dir = tempfile::tempdir().unwrap();
        let mut config = DispatchConfig::default();
        config.orders_path = dir.path().join("orders.json");
        config.couriers_path = couriers.path().to_path_buf();

        let err = Driver::new(config).load_inputs().unwrap_err();
        assert!(matches!(err, DispatchError::Ingestion(IngestionError::Read { .. })));
    }
}
