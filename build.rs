use std::{
    env,
    fs::{self, File},
    io::{self, BufWriter, Write},
};

// Take all files under `themes` and turn them into a map of theme name to contents. This is
// pulled in by the theme registry so the built-in palettes ship inside the binary.
fn build_themes(out_dir: &str) -> io::Result<()> {
    let output_path = format!("{out_dir}/themes.rs");
    let mut output_file = BufWriter::new(File::create(output_path)?);
    output_file.write_all(b"use std::collections::BTreeMap as Map;\n")?;
    output_file.write_all(b"use once_cell::sync::Lazy;\n")?;
    output_file.write_all(b"static THEMES: Lazy<Map<&'static str, &'static [u8]>> = Lazy::new(|| Map::from([\n")?;

    let mut paths = fs::read_dir("themes")?.collect::<io::Result<Vec<_>>>()?;
    paths.sort_by_key(|e| e.path());
    for theme_file in paths {
        let path = theme_file.path();
        if !theme_file.metadata()?.is_file() {
            panic!("found non file in themes directory: {}", path.display());
        }
        let contents = fs::read(&path)?;
        let file_name = path.file_name().expect("no file name").to_string_lossy();
        let Some((theme_name, "yaml")) = file_name.split_once('.') else {
            panic!("theme files must be named <name>.yaml: {file_name}");
        };
        output_file.write_all(format!("(\"{theme_name}\", {contents:?}.as_slice()),\n").as_bytes())?;
    }
    output_file.write_all(b"]));\n")?;

    println!("cargo:rerun-if-changed=themes");
    Ok(())
}

fn main() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    build_themes(&out_dir)
}
