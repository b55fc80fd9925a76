//! Shared fixtures: an in-process HTTP server standing in for the GitHub API

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Cursor, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use zip::write::FileOptions;

/// A canned HTTP response
#[derive(Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// Minimal HTTP/1.1 server answering GETs from a fixed route table
pub struct FixtureServer {
    pub base_url: String,
}

impl FixtureServer {
    /// Start serving; `{base}` in route bodies is replaced by the server URL
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture server");
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let table: HashMap<String, Route> = routes
            .into_iter()
            .map(|(path, mut route)| {
                if let Ok(text) = String::from_utf8(route.body.clone()) {
                    route.body = text.replace("{base}", &base_url).into_bytes();
                }
                (path.to_string(), route)
            })
            .collect();
        let table = Arc::new(table);

        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let table = Arc::clone(&table);
                thread::spawn(move || serve(stream, &table));
            }
        });

        Self { base_url }
    }
}

fn serve(mut stream: TcpStream, table: &HashMap<String, Route>) {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    // Drain headers
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) if line == "\r\n" || line == "\n" => break,
            Ok(_) => continue,
            Err(_) => return,
        }
    }

    let path = request_line.split_whitespace().nth(1).unwrap_or("/");
    let route = table.get(path).cloned().unwrap_or(Route {
        status: 404,
        body: b"{\"message\":\"Not Found\"}".to_vec(),
    });
    let reason = if route.status == 200 { "OK" } else { "Error" };

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        reason,
        route.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&route.body);
    let _ = stream.flush();
}

/// Build a zip archive; names ending in `/` become directories
pub fn zip_archive(entries: &[(&str, &str, u32)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body, mode) in entries {
        let options = FileOptions::<()>::default().unix_permissions(*mode);
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Tag feed for octocat/Hello-World with v2.0.0 listed before v1.0.0
pub const HELLO_TAGS: &str = r#"[
  {"name": "v2.0.0", "zipball_url": "{base}/zipball/v2.0.0", "commit": {"sha": "2222222222222222222222222222222222222222"}},
  {"name": "v1.0.0", "zipball_url": "{base}/zipball/v1.0.0", "commit": {"sha": "1111111111111111111111111111111111111111"}}
]"#;

/// Server with the Hello-World feed and both archives
pub fn hello_world_server() -> FixtureServer {
    FixtureServer::start(vec![
        ("/repos/octocat/Hello-World/tags", Route::ok(HELLO_TAGS)),
        (
            "/zipball/v1.0.0",
            Route::ok(zip_archive(&[
                ("octocat-Hello-World-1111111/", "", 0o755),
                ("octocat-Hello-World-1111111/README", "Hello World v1!\n", 0o644),
                ("octocat-Hello-World-1111111/bin/hello", "#!/bin/sh\necho hi\n", 0o755),
            ])),
        ),
        (
            "/zipball/v2.0.0",
            Route::ok(zip_archive(&[(
                "octocat-Hello-World-2222222/README",
                "Hello World v2!\n",
                0o644,
            )])),
        ),
        ("/repos/acme/garbled/tags", Route::ok("<html>not json</html>")),
        (
            "/repos/acme/evil/tags",
            Route::ok(r#"[{"name": "v0.1.0", "zipball_url": "{base}/zipball/evil", "commit": {"sha": "6666666"}}]"#),
        ),
        (
            "/zipball/evil",
            Route::ok(zip_archive(&[
                ("evil/ok.txt", "fine", 0o644),
                ("../../outside.txt", "gotcha", 0o644),
            ])),
        ),
        (
            "/repos/acme/notzip/tags",
            Route::ok(r#"[{"name": "v1.0.0", "zipball_url": "{base}/zipball/notzip", "commit": {"sha": "9999999"}}]"#),
        ),
        ("/zipball/notzip", Route::ok("this is not a zip file")),
    ])
}
