use anyhow::{bail, Context};

fn main() -> anyhow::Result<()> {
    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: parse <grammar.ebnf>");
    };

    match ebnf_cst::parse_file(&path) {
        Ok(tree) => {
            print!("{}", tree.dump());
            Ok(())
        }
        Err(err) => {
            println!("partial tree:\n{}", err.tree().dump());
            println!("parsed text: {:?}", err.tree().to_string());
            Err(err).with_context(|| format!("failed to parse {path}"))
        }
    }
}
