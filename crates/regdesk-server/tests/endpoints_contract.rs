// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

#[test]
fn router_paths_match_the_openapi_document() {
    let router_src = std::fs::read_to_string(
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("src/router.rs"),
    )
    .expect("read router source");

    let param_re = regex::Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("param regex");
    let route_set: BTreeSet<String> = regex::Regex::new(r#"\.route\(\s*"([^"]+)""#)
        .expect("regex")
        .captures_iter(&router_src)
        .map(|cap| param_re.replace_all(&cap[1], "{$1}").to_string())
        .collect();

    let documented: BTreeSet<String> = regdesk_api::openapi::documented_paths()
        .into_iter()
        .collect();

    assert!(route_set.contains("/api/providers/{id}/execution/{monthKey}"));
    assert_eq!(route_set, documented, "router/OpenAPI drift");
}
