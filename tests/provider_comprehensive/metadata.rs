//! Metadata Tests
//!
//! GetMetadata, GetProviderSchema, ValidateProviderConfig, StopProvider and
//! the uniformly rejected resource and data-source methods.

use crate::common::*;
use tfjq::{ExecFunction, PROVIDER_ADDRESS};

// ============================================================================
// Provider methods
// ============================================================================

#[test]
fn metadata_lists_exec() {
    let executor = create_executor();
    let Response::GetMetadata(meta) = executor.execute(Request::GetMetadata).unwrap() else {
        panic!("expected GetMetadata response");
    };
    let names: Vec<_> = meta.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["exec"]);
    assert!(meta.server_capabilities.get_provider_schema_optional);
}

#[test]
fn provider_schema_has_optional_jq_attribute() {
    let executor = create_executor();
    let Response::GetProviderSchema(schema) = executor.execute(Request::GetProviderSchema).unwrap()
    else {
        panic!("expected GetProviderSchema response");
    };

    let attrs = &schema.provider.block.attributes;
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs[0].name, "jq");
    assert_eq!(attrs[0].ty, ValueType::String);
    assert!(attrs[0].optional);
    assert!(!attrs[0].required);

    assert_eq!(schema.functions.len(), 1);
    assert_eq!(schema.functions["exec"], ExecFunction::definition());
}

#[test]
fn exec_signature() {
    let def = ExecFunction::definition();
    assert_eq!(def.parameters.len(), 1);
    assert_eq!(def.parameters[0].name, "code");
    assert_eq!(def.parameters[0].ty, ValueType::String);
    let variadic = def.variadic_parameter.as_ref().unwrap();
    assert_eq!(variadic.ty, ValueType::Dynamic);
    assert!(variadic.allow_null_value);
    assert_eq!(def.return_.ty, ValueType::Dynamic);
}

#[test]
fn schema_is_stable_across_calls() {
    let executor = create_executor();
    let a = executor.execute(Request::GetProviderSchema).unwrap();
    let b = executor.execute(Request::GetProviderSchema).unwrap();
    assert_eq!(a, b);
}

#[test]
fn validate_echoes_config() {
    let executor = create_executor();
    let cfg = config(Some(".a"));
    let Response::ValidateProviderConfig(resp) = executor
        .execute(Request::ValidateProviderConfig {
            config: cfg.clone(),
        })
        .unwrap()
    else {
        panic!("expected ValidateProviderConfig response");
    };
    assert_eq!(resp.prepared_config, cfg);
    assert!(resp.diagnostics.is_empty());
}

#[test]
fn stop_acknowledges() {
    let executor = create_executor();
    assert!(matches!(
        executor.execute(Request::StopProvider).unwrap(),
        Response::StopProvider(_)
    ));
}

#[test]
fn provider_address() {
    assert_eq!(PROVIDER_ADDRESS, "registry.opentofu.org/opentofu/jq");
}

// ============================================================================
// Unsupported methods
// ============================================================================

#[test]
fn resource_and_data_source_methods_not_supported() {
    let executor = create_executor();
    let type_name = || "jq_thing".to_string();
    let requests = vec![
        Request::ValidateResourceConfig { type_name: type_name() },
        Request::UpgradeResourceState { type_name: type_name() },
        Request::ReadResource { type_name: type_name() },
        Request::PlanResourceChange { type_name: type_name() },
        Request::ApplyResourceChange { type_name: type_name() },
        Request::ImportResourceState { type_name: type_name() },
        Request::ValidateDataResourceConfig { type_name: type_name() },
        Request::ReadDataSource { type_name: type_name() },
    ];

    for result in executor.execute_many(requests) {
        let err = result.unwrap_err();
        assert!(matches!(err, Error::NotSupported { .. }));
        assert_eq!(err.to_string(), "not supported");
    }
}

#[test]
fn unsupported_methods_work_after_configure() {
    let executor = create_executor();
    executor
        .execute(Request::ConfigureProvider { config: config(None) })
        .unwrap();
    assert!(executor
        .execute(Request::ReadResource {
            type_name: String::new()
        })
        .is_err());
}
