// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Splinebender command line

fn main() -> anyhow::Result<()> {
    splinebender::run()
}
