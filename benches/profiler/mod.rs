// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Criterion with a pprof flamegraph profiler attached (`cargo bench -- --profile-time 10`).
///
/// Tunable through `THETIS_PROFILE_FREQ`, `THETIS_BENCH_SAMPLES`, `THETIS_BENCH_WARMUP_SECS` and
/// `THETIS_BENCH_MEASURE_SECS`.
pub fn criterion() -> Criterion {
    let frequency = env_or::<i32>("THETIS_PROFILE_FREQ", 100).clamp(1, 1000);
    let samples = env_or::<usize>("THETIS_BENCH_SAMPLES", 50).clamp(10, 200);
    let warmup = env_or::<u64>("THETIS_BENCH_WARMUP_SECS", 2).clamp(1, 60);
    let measure = env_or::<u64>("THETIS_BENCH_MEASURE_SECS", 4).clamp(1, 120);

    Criterion::default()
        .sample_size(samples)
        .warm_up_time(Duration::from_secs(warmup))
        .measurement_time(Duration::from_secs(measure))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
