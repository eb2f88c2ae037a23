//! Integration tests for the layered configuration stack

use std::collections::HashMap;
use std::sync::Arc;

use strata_config::{
    Config, ConfigError, ConfigExt, ConfigStore, EnvConfig, Key, PropertiesConfig,
    StringOverrideLayer,
};
use strata_registry::RegistryError;

fn key(raw: &str) -> Key {
    Key::parse(raw).unwrap()
}

#[test]
fn test_properties_layer_over_typed_defaults() {
    let mut builder = ConfigStore::builder();
    builder.add(key("/test/int"), 1i32).unwrap();
    builder
        .add(key("/test/string"), "hello".to_string())
        .unwrap();
    let base: Arc<dyn Config> = Arc::new(builder.build().unwrap());

    let properties = HashMap::from([("test_string".to_string(), "file".to_string())]);
    let config = PropertiesConfig::new(base, &properties).unwrap();

    assert_eq!(config.get::<i32>(&key("/test/int")).unwrap(), 1);
    assert_eq!(
        config.get::<String>(&key("/test/string")).unwrap(),
        "file".to_string()
    );
}

fn db_base() -> Arc<dyn Config> {
    let mut builder = ConfigStore::builder();
    builder
        .add(key("/db/host"), "default".to_string())
        .unwrap();
    builder.add(key("/db/port"), 5432u16).unwrap();
    Arc::new(builder.build().unwrap())
}

#[test]
fn test_env_layer_chained_over_properties_layer() {
    let properties = HashMap::from([
        ("db_host".to_string(), "fromfile".to_string()),
        ("db_port".to_string(), "6000".to_string()),
    ]);

    // The environment is the outermost layer, so it wins where set
    temp_env::with_vars([("DB_HOST", Some("fromenv")), ("DB_PORT", None)], || {
        let props = PropertiesConfig::new(db_base(), &properties).unwrap();
        let config = EnvConfig::new(Arc::new(props)).unwrap();

        assert_eq!(
            config.get::<String>(&key("/db/host")).unwrap(),
            "fromenv".to_string()
        );
        assert_eq!(config.get::<u16>(&key("/db/port")).unwrap(), 6000);
    });

    // Without the environment, the properties win over the defaults
    temp_env::with_vars([("DB_HOST", None::<&str>), ("DB_PORT", None)], || {
        let props = PropertiesConfig::new(db_base(), &properties).unwrap();
        let config = EnvConfig::new(Arc::new(props)).unwrap();

        assert_eq!(
            config.get::<String>(&key("/db/host")).unwrap(),
            "fromfile".to_string()
        );
    });
}

#[test]
fn test_layer_keys_match_base_regardless_of_overrides() {
    let mut builder = ConfigStore::builder();
    builder.add(key("/a"), 1i32).unwrap();
    builder.add(key("/b"), 2i32).unwrap();
    let base: Arc<dyn Config> = Arc::new(builder.build().unwrap());

    let properties = HashMap::from([
        ("a".to_string(), "10".to_string()),
        // 'unrelated' is not a declared key and must not appear
        ("unrelated".to_string(), "1".to_string()),
    ]);
    let config = PropertiesConfig::new(base, &properties).unwrap();

    let mut keys: Vec<String> = config.keys().map(|k| k.to_string()).collect();
    keys.sort();
    assert_eq!(keys, vec!["/a", "/b"]);
    assert!(!config.contains_key(&key("/unrelated")));
}

#[test]
fn test_malformed_override_fails_layer_construction() {
    let mut builder = ConfigStore::builder();
    builder.add(key("/test/int"), 1i32).unwrap();
    let base: Arc<dyn Config> = Arc::new(builder.build().unwrap());

    let properties = HashMap::from([("test_int".to_string(), "notanumber".to_string())]);
    let result = PropertiesConfig::new(base, &properties);

    assert!(matches!(
        result,
        Err(ConfigError::Registry(RegistryError::MalformedValue { .. }))
    ));
}

#[test]
fn test_override_for_undeserializable_type_fails_layer_construction() {
    #[derive(Debug, Clone, PartialEq)]
    struct Endpoints(Vec<String>);

    let mut builder = ConfigStore::builder();
    builder
        .add(key("/endpoints"), Endpoints(vec!["a".to_string()]))
        .unwrap();
    let base: Arc<dyn Config> = Arc::new(builder.build().unwrap());

    // No override string: the layer builds and the default is readable
    let layer = StringOverrideLayer::new(Arc::clone(&base), |_| None).unwrap();
    assert_eq!(
        layer.get::<Endpoints>(&key("/endpoints")).unwrap(),
        Endpoints(vec!["a".to_string()])
    );

    // An override string for a type without a deserializer is fatal
    let result = StringOverrideLayer::new(base, |_| Some("a,b".to_string()));
    assert!(matches!(
        result,
        Err(ConfigError::Registry(RegistryError::NoDeserializer { .. }))
    ));
}
