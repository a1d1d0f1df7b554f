use rssbridge::{dom, extract, extract_with_options, locator, Error, Options};

const PAGE: &str = "https://example.com/blog";

#[test]
fn extract_reads_article_elements() {
    let html = r#"
        <html>
          <head><title>Example Blog</title></head>
          <body>
            <article>
              <h2>First story of the day</h2>
              <a href="/posts/1">Read more</a>
              <time datetime="2024-04-01">April 1</time>
              <p class="summary">What happened first.</p>
            </article>
            <article>
              <h2>Second story of the day</h2>
              <a href="https://other.example.net/2">Read more</a>
            </article>
          </body>
        </html>
    "#;

    match extract(html.as_bytes(), PAGE) {
        Ok(feed) => {
            assert_eq!(feed.title, "Example Blog");
            assert_eq!(feed.items.len(), 2);
            assert_eq!(feed.items[0].title, "First story of the day");
            assert_eq!(feed.items[0].link, "https://example.com/posts/1");
            assert_eq!(feed.items[0].pub_date, "2024-04-01");
            assert_eq!(feed.items[0].description, "What happened first.");
            assert_eq!(feed.items[1].link, "https://other.example.net/2");
            assert_eq!(feed.items[1].pub_date, "");
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn extract_supports_role_article() {
    let html = r#"
        <html>
          <body>
            <div role='article'><h3>Role based article</h3></div>
          </body>
        </html>
    "#;

    match extract(html.as_bytes(), PAGE) {
        Ok(feed) => {
            assert_eq!(feed.items.len(), 1);
            assert_eq!(feed.items[0].title, "Role based article");
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn extract_reads_list_items() {
    let html = r#"
        <ul>
          <li class="news-entry"><h4>Listed headline one</h4><a href="one">x</a></li>
          <li class="nav-link"><h4>Not an article</h4></li>
          <li class="news-entry"><h4>Listed headline two</h4><a href="two">x</a></li>
        </ul>
    "#;

    match extract(html.as_bytes(), "https://example.com/news") {
        Ok(feed) => {
            let titles: Vec<&str> = feed.items.iter().map(|i| i.title.as_str()).collect();
            assert_eq!(titles, vec!["Listed headline one", "Listed headline two"]);
            assert_eq!(feed.items[0].link, "https://example.com/news/one");
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn locator_caps_containers() {
    let html: String = (0..50)
        .map(|n| format!("<article><h2>Headline {n}</h2></article>"))
        .collect();
    let doc = dom::parse(&html);

    let containers = locator::locate(&doc, &Options::default());
    assert_eq!(containers.len(), 15);
    assert_eq!(containers.last().map(|c| c.ordinal), Some(15));

    let narrow = Options {
        max_containers: 4,
        ..Options::default()
    };
    assert_eq!(locator::locate(&doc, &narrow).len(), 4);
}

#[test]
fn short_and_missing_titles_are_discarded() {
    let html = r#"
        <article><h2>  Hey  </h2><a href="/a">a</a></article>
        <article><p>No heading in this one</p></article>
        <article><h2>Kept headline</h2></article>
    "#;

    match extract(html.as_bytes(), PAGE) {
        Ok(feed) => {
            assert_eq!(feed.items.len(), 1);
            assert_eq!(feed.items[0].title, "Kept headline");
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn description_is_truncated_by_characters() {
    let body = "é".repeat(1000);
    let html = format!(r#"<article><h2>Accented story</h2><p class="excerpt">{body}</p></article>"#);

    match extract(html.as_bytes(), PAGE) {
        Ok(feed) => assert_eq!(feed.items[0].description.chars().count(), 400),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn precise_dates_are_opt_in() {
    let html = r#"<article><h2>Dated story</h2><span class="published">January 15, 2024</span></article>"#;

    let lossy = extract(html.as_bytes(), PAGE).map(|feed| feed.items[0].pub_date.clone());
    assert_eq!(lossy.ok().as_deref(), Some("2024-01-01"));

    let options = Options {
        precise_text_dates: true,
        ..Options::default()
    };
    let precise = extract_with_options(html.as_bytes(), PAGE, &options).map(|feed| feed.items[0].pub_date.clone());
    assert_eq!(precise.ok().as_deref(), Some("2024-01-15"));
}

#[test]
fn page_without_containers_is_empty_not_error() {
    let html = "<html><body><p>Welcome to my homepage.</p></body></html>";

    match extract(html.as_bytes(), PAGE) {
        Ok(feed) => {
            assert!(feed.items.is_empty());
            assert_eq!(feed.title, "Generated Feed");
            assert_eq!(feed.description, "Auto-generated RSS feed");
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn unparsable_input_is_a_parse_error() {
    assert!(matches!(extract(b"", PAGE), Err(Error::ParseError(_))));
    assert!(matches!(extract(b"\0\0\0\0", PAGE), Err(Error::ParseError(_))));
}

#[test]
fn latin1_pages_are_decoded_leniently() {
    let html = b"<html><head><meta charset=\"windows-1252\"></head><body><article><h2>Caf\xE9 reopens</h2></article></body></html>";

    match extract(html, PAGE) {
        Ok(feed) => assert_eq!(feed.items[0].title, "Café reopens"),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}
