//! Chunking Report
//!
//! Runs the three routes over synthetic documents and tabulates chunk
//! counts, size histograms, and outliers — the reporting pass used to
//! sanity-check bound policies before an embedding run.
//!
//! ```bash
//! cargo run --example chunking_report
//! ```

use quarry::{chunk_document, BoundPolicy, Chunk, DocType, Document};

fn main() {
    println!("Chunking Report");
    println!("===============\n");

    let default_policy = BoundPolicy::default();
    let documents = synthetic_documents();

    println!(
        "Policy: target {} tokens, max {} tokens, max {} chars\n",
        default_policy.target_tokens(),
        default_policy.max_tokens(),
        default_policy.max_chars()
    );

    for (doc, text) in &documents {
        report(doc, text, &default_policy);
    }

    // A tightened regime: how much does chunk count inflate when the
    // ceilings drop?
    let tight = BoundPolicy::default()
        .with_max_tokens(400)
        .unwrap()
        .with_max_chars(1800)
        .unwrap();

    println!("--- Tightened regime: max {} tokens ---\n", tight.max_tokens());
    for (doc, text) in &documents {
        report(doc, text, &tight);
    }
}

fn report(doc: &Document, text: &str, policy: &BoundPolicy) {
    let chunks = chunk_document(doc, text, policy);

    println!("{} ({:?})", doc.path, doc.doc_type);
    println!("  input:  {} bytes", text.len());
    println!("  chunks: {}", chunks.len());

    if chunks.is_empty() {
        println!();
        return;
    }

    let sizes: Vec<usize> = chunks.iter().map(|c| policy.estimate_tokens(&c.text)).collect();
    let min = sizes.iter().min().unwrap();
    let max = sizes.iter().max().unwrap();
    let mean = sizes.iter().sum::<usize>() / sizes.len();
    println!("  tokens: min {min} / mean {mean} / max {max}");

    histogram(&sizes, policy.max_tokens());
    outliers(&chunks, policy);
    println!();
}

fn histogram(sizes: &[usize], ceiling: usize) {
    const BUCKETS: usize = 8;
    let mut counts = [0usize; BUCKETS];
    for &size in sizes {
        let bucket = (size * BUCKETS / (ceiling + 1)).min(BUCKETS - 1);
        counts[bucket] += 1;
    }

    for (i, count) in counts.iter().enumerate() {
        let lo = i * ceiling / BUCKETS;
        let hi = (i + 1) * ceiling / BUCKETS;
        println!("  {lo:>5}-{hi:<5} {}", "#".repeat(*count));
    }
}

/// Flag chunks in the top or bottom decile of the token ceiling: both
/// ends embed poorly (tiny fragments dilute recall, near-ceiling chunks
/// crowd the window).
fn outliers(chunks: &[Chunk], policy: &BoundPolicy) {
    for chunk in chunks {
        let tokens = policy.estimate_tokens(&chunk.text);
        if tokens * 10 < policy.max_tokens() {
            println!("  outlier (tiny):   [{}] {} tokens", chunk.chunk_index, tokens);
        } else if tokens * 10 > policy.max_tokens() * 9 {
            println!("  outlier (near max): [{}] {} tokens", chunk.chunk_index, tokens);
        }
    }
}

fn synthetic_documents() -> Vec<(Document, String)> {
    let narrative = "The long exposure rewards patience more than gear. \
                     Scout the foreground in daylight and return after dark. \
                     A two-second delay beats a remote you forgot to pack. "
        .repeat(120);

    let guide = {
        let mut text = String::new();
        for platform in ["Luminar", "Veltrix", "Auric"] {
            text.push_str(&format!("## {platform}\n"));
            for i in 0..40 {
                text.push_str(&format!(
                    "- capability {i}: notes on how {platform} handles it in practice\n"
                ));
            }
            text.push('\n');
        }
        text
    };

    let records = {
        let entries: Vec<String> = (0..25)
            .map(|i| {
                format!(
                    r#"{{"name": "Model {i}", "platform": "Luminar",
                        "summary": "Catalog entry {i}.",
                        "specText": "Specification prose for model {i}, repeated to give the guardrail something to do. {}"}}"#,
                    "More detail. ".repeat(40).trim()
                )
            })
            .collect();
        format!("[{}]", entries.join(","))
    };

    vec![
        (
            Document::new("notes/field-notes.md", "notes", DocType::Generic),
            narrative,
        ),
        (
            Document::new("data/platform-guides.md", "guides", DocType::PlatformGuide),
            guide,
        ),
        (
            Document::new("data/base-models.json", "data", DocType::Generic),
            records,
        ),
    ]
}
