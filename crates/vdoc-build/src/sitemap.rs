//! Sitemap XML.

use std::io;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Serialize a sitemap with one `<url>` per location, in the given order.
///
/// Every entry carries the same `lastmod`.
pub fn sitemap_xml(locations: &[String], lastmod: DateTime<Utc>) -> io::Result<Vec<u8>> {
    let lastmod = lastmod.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(urlset))?;

    for loc in locations {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        text_element(&mut writer, "loc", loc)?;
        text_element(&mut writer, "lastmod", &lastmod)?;
        text_element(&mut writer, "changefreq", "weekly")?;
        text_element(&mut writer, "priority", "1")?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    let mut xml = writer.into_inner();
    xml.push(b'\n');
    Ok(xml)
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sitemap_xml() {
        let lastmod = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let locations = vec![
            "https://docs.example.com/1.0/a.html".to_owned(),
            "https://docs.example.com/1.0/b&c.html".to_owned(),
        ];
        let xml = String::from_utf8(sitemap_xml(&locations, lastmod).unwrap()).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert_eq!(xml.matches("<lastmod>2024-05-01T12:00:00Z</lastmod>").count(), 2);
        assert_eq!(xml.matches("<changefreq>weekly</changefreq>").count(), 2);
        assert_eq!(xml.matches("<priority>1</priority>").count(), 2);
        assert!(xml.contains("<loc>https://docs.example.com/1.0/b&amp;c.html</loc>"));
        let a = xml.find("a.html").unwrap();
        let b = xml.find("b&amp;c.html").unwrap();
        assert!(a < b);
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_empty_sitemap() {
        let xml = String::from_utf8(sitemap_xml(&[], Utc::now()).unwrap()).unwrap();
        assert!(!xml.contains("<url>"));
        assert!(xml.contains("</urlset>"));
    }
}
