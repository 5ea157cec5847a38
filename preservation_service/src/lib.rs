/*!
Preservation Service

The HTTP service for the property-preservation platform: property and
work-order submission for banks, lifecycle actions for vendors.
*/

#![warn(
    unreachable_pub,
    redundant_lifetimes,
    unsafe_code,
    non_local_definitions,
    clippy::needless_pass_by_value,
    clippy::needless_pass_by_ref_mut
)]

pub mod api;
pub mod config;
pub mod constants;
