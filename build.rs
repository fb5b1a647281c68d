use std::env;
use std::fs;
use std::io;
use std::path::Path;

const ADMIN_DIST: &str = "admin/dist";

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed={ADMIN_DIST}");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(io::Error::other)?;
    let dist_path = Path::new(&manifest_dir).join(ADMIN_DIST);

    // rust-embed 要求目录存在，未构建管理后台时写入占位页
    if !dist_path.join("index.html").exists() {
        println!("cargo:warning={ADMIN_DIST} not found, embedding a placeholder page");
        write_placeholder(&dist_path)?;
    }
    Ok(())
}

fn write_placeholder(dist_path: &Path) -> io::Result<()> {
    fs::create_dir_all(dist_path.join("assets"))?;

    let html = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>School Hub</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 560px; margin: 96px auto; padding: 0 20px; }
        code { background: #f1f3f4; padding: 2px 6px; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>School Hub</h1>
    <p>The admin console has not been built. The REST API is available under <code>/api/v1</code>.</p>
    <p>Build the console with <code>cd admin &amp;&amp; npm install &amp;&amp; npm run build</code>, then rebuild the server.</p>
</body>
</html>
"#;
    fs::write(dist_path.join("index.html"), html)
}
