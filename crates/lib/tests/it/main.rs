/*! Integration tests for Fieldstates.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - record: Tests for the Record type
 * - states: Tests for the pure sequence functions (fingerprint, find, remove, replace)
 * - field_states: Tests for the immutable FieldStates collection
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("fieldstates=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod record;
mod states;
