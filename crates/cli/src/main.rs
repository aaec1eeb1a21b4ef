use anyhow::Result;

fn main() -> Result<()> {
  gram_synth::execute_main()
}
