use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::{json, Map, Value as JsonValue};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Multiplicative noise around 1.0.
    fn jitter(&mut self, spread: f64) -> f64 {
        1.0 + (self.next_f64() - 0.5) * 2.0 * spread
    }
}

/// One column of the sample table: header and per-year values.
struct SampleColumn {
    header: &'static str,
    values: Vec<Option<f64>>,
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let years: Vec<i64> = (2005..=2024).collect();
    let n = years.len();
    let growth = |i: usize, base: f64, rate: f64| base * (1.0 + rate).powi(i as i32);

    let mut columns: Vec<SampleColumn> = Vec::new();
    let mut series = |header: &'static str, f: &mut dyn FnMut(usize, i64) -> Option<f64>| {
        let values = years.iter().enumerate().map(|(i, &y)| f(i, y)).collect();
        columns.push(SampleColumn { header, values });
    };

    // Older exports stored revenue in euros, newer ones in billions.
    series("Revenue", &mut |i, y| {
        let billions = growth(i, 0.5, 0.14) * rng.jitter(0.05);
        Some(if y < 2015 { (billions * 1e9).round() } else { billions })
    });
    series("Early Stage Startup Revenue", &mut |i, _| {
        Some(growth(i, 0.08, 0.12) * rng.jitter(0.08))
    });
    series("Scaleup Revenue", &mut |i, y| {
        (y >= 2012).then(|| growth(i, 0.2, 0.16) * rng.jitter(0.08))
    });
    series("Employees", &mut |i, _| Some((growth(i, 9000.0, 0.11) * rng.jitter(0.03)).round()));
    series("Employees in Finland", &mut |i, _| {
        Some((growth(i, 7500.0, 0.09) * rng.jitter(0.03)).round())
    });
    series("Number of startups", &mut |i, _| Some((growth(i, 1200.0, 0.07)).round()));
    series("Startups in Finland", &mut |i, _| Some((growth(i, 1100.0, 0.06)).round()));
    series("Naiset", &mut |i, y| {
        // Missing survey years are reported as -1.
        if y == 2009 {
            Some(-1.0)
        } else {
            Some((growth(i, 2200.0, 0.13) * rng.jitter(0.04)).round())
        }
    });
    series("Miehet", &mut |i, _| Some((growth(i, 6800.0, 0.10) * rng.jitter(0.04)).round()));
    series("Share of Finnish", &mut |i, _| Some(0.9 - i as f64 * 0.006));
    series("Share of foreign", &mut |i, _| Some(0.1 + i as f64 * 0.006));
    series("R&D investments", &mut |i, _| {
        Some(growth(i, 80.0e6, 0.12) * rng.jitter(0.1))
    });

    // ---- Parquet ----
    let mut fields = vec![Field::new("Vuosi", DataType::Int64, false)];
    let mut arrays: Vec<ArrayRef> = vec![Arc::new(Int64Array::from(years.clone()))];
    for col in &columns {
        fields.push(Field::new(col.header, DataType::Float64, true));
        arrays.push(Arc::new(Float64Array::from(col.values.clone())));
    }
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let parquet_path = "sample_data.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;

    // ---- JSON (records) ----
    let records: Vec<JsonValue> = (0..n)
        .map(|i| {
            let mut obj = Map::new();
            obj.insert("Vuosi".into(), json!(years[i]));
            for col in &columns {
                if let Some(v) = col.values[i] {
                    obj.insert(col.header.into(), json!(v));
                }
            }
            JsonValue::Object(obj)
        })
        .collect();
    let json_path = "sample_data.json";
    std::fs::write(json_path, serde_json::to_string_pretty(&records)?)
        .context("writing sample JSON")?;

    // ---- Barometer (quarterly net balances) ----
    let barometer: Vec<JsonValue> = (2022..=2024)
        .flat_map(|y| (1..=4).map(move |q| (y, q)))
        .map(|(y, q)| {
            let past = ((rng.next_f64() - 0.6) * 60.0).round();
            let next = ((rng.next_f64() - 0.4) * 60.0).round();
            json!({ "Period": format!("Q{q} {y}"), "Past 3 months": past, "Next 3 months": next })
        })
        .collect();
    let barometer_path = "sample_barometer.json";
    std::fs::write(barometer_path, serde_json::to_string_pretty(&barometer)?)
        .context("writing barometer JSON")?;

    println!(
        "Wrote {n} years x {} columns to {parquet_path} and {json_path}, barometer to {barometer_path}",
        columns.len() + 1
    );
    Ok(())
}
