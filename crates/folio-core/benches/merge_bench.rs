// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the option merge path in folio-core.
// Every document creation merges theme options with call overrides, so this
// is the per-document hot path before the engine is built.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;

use folio_core::{FontFiles, Merge, Options, OptionsOverride};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Merge a realistic call override onto a theme that already carries fonts
/// and engine extras.
fn bench_options_merge(c: &mut Criterion) {
    let theme = Options::default().merge(
        &OptionsOverride::new()
            .margin_left(10.0)
            .font("brand", FontFiles::regular("Brand.ttf").with_bold("Brand-Bold.ttf"))
            .extra("watermark", json!({"text": "DRAFT", "alpha": 0.2})),
    );
    let call = OptionsOverride::new()
        .image_dpi(300)
        .margin_top(15.0)
        .extra("watermark", json!({"alpha": 0.5}));

    c.bench_function("options_merge (theme + call)", |b| {
        b.iter(|| black_box(black_box(&theme).merge(black_box(&call))));
    });
}

criterion_group!(benches, bench_options_merge);
criterion_main!(benches);
