//! # Registro Testkit
//!
//! Testing utilities for the registro kernel.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known field tuples with expected digests for
//!   cross-platform verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up registry scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the canonical hash scheme:
//!
//! ```rust
//! use registro_testkit::vectors::all_vectors;
//!
//! for vector in all_vectors() {
//!     let digest = vector.compute_digest();
//!     assert_eq!(digest.to_hex(), vector.expected_digest);
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up registry scenarios:
//!
//! ```rust,no_run
//! use registro_testkit::fixtures::TestFixture;
//!
//! async fn example() {
//!     let fixture = TestFixture::new();
//!     fixture.register_sample("cert1").await.unwrap();
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{sample_request, TestFixture};
pub use generators::{request_from_params, CertParams};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
