// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_scene(layers: usize) -> String {
    let mut content = String::from("sources:\n  osm:\n    type: MVT\n    url: https://tile.example.com/tiles.mvt\n\nlayers:\n");
    for layer in 0..layers {
        content.push_str(&format!(
            "  layer_{layer}:\n    data: {{ source: osm, layer: layer_{layer} }}\n    filter:\n      - kind: road\n      - kind: path\n    draw:\n      lines:\n        order: {layer}\n        width: [[10, 1px], [18, 4px]]\n        color: '#{:06x}'\n",
            layer * 97 % 0xffffff
        ));
    }
    content
}

#[allow(dead_code)]
pub fn generate_large_scene() -> String {
    generate_scene(500)
}

/// Addresses that exist in a scene from [`generate_scene`].
#[allow(dead_code)]
pub fn scene_addresses(layers: usize) -> Vec<String> {
    (0..layers)
        .step_by((layers / 10).max(1))
        .map(|layer| format!("layers:layer_{layer}:draw:lines:color"))
        .collect()
}
