use async_trait::async_trait;
use secquery::{Edgar, EdgarError, EdgarUrls, Transport};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

pub fn fixture_path(relative: impl AsRef<Path>) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn read_fixture(relative: impl AsRef<Path>) -> String {
    fs::read_to_string(fixture_path(relative)).expect("fixture file should be readable")
}

/// Serves canned bodies by exact URL and records every requested URL in order.
///
/// Unknown URLs answer with `EdgarError::NotFound`.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(url.into(), body.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch(&self, url: &str) -> secquery::Result<String> {
        self.calls.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or(EdgarError::NotFound)
    }
}

/// Builds a client on top of `transport` with the default SEC.gov base URLs.
#[allow(dead_code)]
pub fn edgar_with(transport: Arc<ScriptedTransport>) -> Edgar {
    Edgar::with_transport(transport, EdgarUrls::default())
}

/// Renders a "current filings" atom page with `entries` synthetic filings whose
/// accession numbers start at `first`.
#[allow(dead_code)]
pub fn atom_page(first: usize, entries: usize) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"ISO-8859-1\" ?>\n\
         <feed xmlns=\"http://www.w3.org/2005/Atom\">\n\
         <title>Latest Filings</title>\n",
    );
    for n in first..first + entries {
        let cik = 1_000_000 + n;
        let accession = format!("0000950170-24-{:06}", n);
        xml.push_str(&format!(
            "<entry>\n\
             <title>8-K - FILER NUMBER {n} ({cik:010}) (Filer)</title>\n\
             <link rel=\"alternate\" type=\"text/html\" href=\"https://www.sec.gov/Archives/edgar/data/{cik}/{plain}/{accession}-index.htm\"/>\n\
             <summary type=\"html\"> &lt;b&gt;Filed:&lt;/b&gt; 2024-03-15 &lt;b&gt;AccNo:&lt;/b&gt; {accession} &lt;b&gt;Size:&lt;/b&gt; 20 KB</summary>\n\
             <updated>2024-03-15T16:05:00-04:00</updated>\n\
             <category scheme=\"https://www.sec.gov/\" label=\"form type\" term=\"8-K\"/>\n\
             <id>urn:tag:sec.gov,2008:accession-number={accession}</id>\n\
             </entry>\n",
            plain = accession.replace('-', ""),
        ));
    }
    xml.push_str("</feed>\n");
    xml
}
