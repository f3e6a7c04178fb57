use std::sync::Arc;

use serde_json::{json, Map};

use crate::{
    common_models::did::DidValue,
    driver::{
        error::DriverProviderError, imp::provider::DriverProviderImpl, provider::DriverProvider,
        Driver, MockDriver,
    },
    request::OperationRequest,
    state::ResultState,
};

fn driver_creating(did: &'static str) -> MockDriver {
    let mut driver = MockDriver::default();
    driver
        .expect_create()
        .returning(move |_, _| Ok(Some(ResultState::finished(DidValue::from(did)))));
    driver
}

fn driver_with_properties(name: &'static str) -> MockDriver {
    let mut driver = MockDriver::default();
    driver.expect_properties().returning(move || {
        let mut properties = Map::new();
        properties.insert("name".to_owned(), json!(name));
        properties
    });
    driver
}

#[tokio::test]
async fn test_get_driver_first_registration_wins() {
    let provider = DriverProviderImpl::new(vec![
        ("example".to_owned(), Arc::new(driver_creating("did:example:first")) as _),
        ("example".to_owned(), Arc::new(driver_creating("did:example:second")) as _),
    ]);

    for _ in 0..3 {
        let driver = provider.get_driver("example").unwrap();
        let state = driver
            .create("example", &OperationRequest::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(Some(DidValue::from("did:example:first")), state.did);
    }
}

#[test]
fn test_get_driver_missing() {
    let provider = DriverProviderImpl::new(vec![(
        "example".to_owned(),
        Arc::new(MockDriver::default()) as Arc<dyn Driver>,
    )]);

    assert!(matches!(
        provider.get_driver("web"),
        Err(DriverProviderError::MissingDriver(method)) if method == "web"
    ));
}

#[test]
fn test_methods_in_registration_order() {
    let provider = DriverProviderImpl::new(vec![
        ("web".to_owned(), Arc::new(MockDriver::default()) as _),
        ("key".to_owned(), Arc::new(MockDriver::default()) as _),
        ("web".to_owned(), Arc::new(MockDriver::default()) as _),
    ]);

    assert_eq!(vec!["web".to_owned(), "key".to_owned()], provider.methods());
}

#[test]
fn test_properties_of_selected_drivers() {
    let provider = DriverProviderImpl::new(vec![
        ("web".to_owned(), Arc::new(driver_with_properties("web-a")) as _),
        ("web".to_owned(), Arc::new(MockDriver::default()) as _),
        ("key".to_owned(), Arc::new(driver_with_properties("key-a")) as _),
    ]);

    assert_eq!(
        json!({ "web": { "name": "web-a" }, "key": { "name": "key-a" } }),
        serde_json::Value::Object(provider.properties())
    );
}
