use pocketgen_core::{bundle_json_schema, document_json_schema};

fn main() {
    let schema = if std::env::args().any(|arg| arg == "--document") {
        document_json_schema()
    } else {
        bundle_json_schema()
    };
    let json = serde_json::to_string_pretty(&schema).expect("serialize json schema");
    println!("{json}");
}
