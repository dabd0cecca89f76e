// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Entry Point
//!
//! proptest checks of the value-object bounds and of the bulk VLAN
//! operations over arbitrary ranges.

mod property;
