use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata for `--version` and the health endpoint
    ShadowBuilder::builder()
        .build()
        .expect("failed to generate build metadata");
}
