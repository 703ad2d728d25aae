//! Architecture contract tests.

mod support;

use support::architecture::{find_lines_containing, path_exists};

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::service",
            "crate::port",
            "tokio::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_do_not_depend_on_implementations() {
    let hits = find_lines_containing(
        "src/port",
        &["crate::adapter", "crate::infrastructure", "crate::service"],
    );

    assert!(
        hits.is_empty(),
        "found implementation imports in ports: {hits:#?}"
    );
}

#[test]
fn services_reach_io_only_through_ports() {
    let hits = find_lines_containing(
        "src/service",
        &["crate::adapter", "crate::infrastructure", "tokio::fs"],
    );

    assert!(
        hits.is_empty(),
        "found direct adapter or file system use in services: {hits:#?}"
    );
}

#[test]
fn outbound_adapters_do_not_reach_into_services() {
    let hits = find_lines_containing(
        "src/adapter/outbound",
        &["crate::service", "crate::infrastructure"],
    );

    assert!(
        hits.is_empty(),
        "found service imports in outbound adapters: {hits:#?}"
    );
}

#[test]
fn composition_root_lives_in_infrastructure() {
    assert!(path_exists("src/infrastructure/bootstrap.rs"));
    assert!(path_exists("src/port/outbound/snapshot.rs"));
    assert!(path_exists("src/port/outbound/summary.rs"));
}
