use super::html::{element_text, first_text, selector};
use super::runtime::RuntimeExtractor;
use film_tally_models::FilmDetails;
use scraper::Html;

/// Extract whatever metadata a film page offers
///
/// Each field is looked up on its own; a missing element only leaves that
/// field empty.
pub fn parse_film_details(html: &str, runtime: &dyn RuntimeExtractor) -> FilmDetails {
    let document = Html::parse_document(html);

    FilmDetails {
        year: first_text(&document, "div.releaseyear"),
        director: parse_director(&document),
        tagline: first_text(&document, "h4.tagline"),
        plot: first_text(&document, "div.truncate"),
        average_rating: parse_average_rating(&document),
        runtime: runtime.extract(&document),
    }
}

/// Director from the credits line, only when it is introduced as such
fn parse_director(document: &Html) -> Option<String> {
    let credits_sel = selector("p.credits").ok()?;
    let intro_sel = selector("span.introduction").ok()?;
    let name_sel = selector("span.prettify").ok()?;

    let credits = document.select(&credits_sel).next()?;
    credits.select(&intro_sel).next()?;
    credits.select(&name_sel).next().and_then(element_text)
}

/// Rating token from the `twitter:data2` meta tag, e.g. "3.85" of "3.85 out of 5"
fn parse_average_rating(document: &Html) -> Option<String> {
    let meta_sel = selector(r#"meta[name="twitter:data2"]"#).ok()?;
    document
        .select(&meta_sel)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .and_then(|content| content.split_whitespace().next())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letterboxd::runtime::FilmDataScript;
    use film_tally_models::Runtime;

    const FILM_PAGE: &str = r#"
        <html>
          <head>
            <meta name="twitter:data1" content="Michael Mann" />
            <meta name="twitter:data2" content="4.15 out of 5" />
            <script>
              var filmData = { id: 51568, name: "Heat", runTime: 170 };
            </script>
          </head>
          <body>
            <section class="film-header-lockup">
              <h1 class="headline-1">Heat</h1>
              <div class="releaseyear"><a href="/films/year/1995/">1995</a></div>
              <p class="credits">
                <span class="introduction">Directed by</span>
                <a href="/director/michael-mann/"><span class="prettify">Michael Mann</span></a>
              </p>
            </section>
            <section class="review">
              <h4 class="tagline">A Los Angeles crime saga</h4>
              <div class="truncate"><p>Obsessive master thief Neil McCauley leads a crew...</p></div>
            </section>
          </body>
        </html>"#;

    #[test]
    fn test_parse_all_fields() {
        let details = parse_film_details(FILM_PAGE, &FilmDataScript);
        assert_eq!(details.year.as_deref(), Some("1995"));
        assert_eq!(details.director.as_deref(), Some("Michael Mann"));
        assert_eq!(details.tagline.as_deref(), Some("A Los Angeles crime saga"));
        assert_eq!(
            details.plot.as_deref(),
            Some("Obsessive master thief Neil McCauley leads a crew...")
        );
        assert_eq!(details.average_rating.as_deref(), Some("4.15"));
        assert_eq!(details.runtime, Some(Runtime(170)));
    }

    #[test]
    fn test_missing_tagline_leaves_other_fields() {
        let html = FILM_PAGE.replace(r#"<h4 class="tagline">A Los Angeles crime saga</h4>"#, "");
        let details = parse_film_details(&html, &FilmDataScript);
        assert_eq!(details.tagline, None);
        assert_eq!(details.year.as_deref(), Some("1995"));
        assert_eq!(details.director.as_deref(), Some("Michael Mann"));
        assert_eq!(details.runtime, Some(Runtime(170)));
    }

    #[test]
    fn test_director_requires_introduction() {
        let html = FILM_PAGE.replace(r#"<span class="introduction">Directed by</span>"#, "");
        let details = parse_film_details(&html, &FilmDataScript);
        assert_eq!(details.director, None);
        assert_eq!(details.year.as_deref(), Some("1995"));
    }

    #[test]
    fn test_empty_page_has_no_details() {
        let details = parse_film_details("<html><body></body></html>", &FilmDataScript);
        assert!(details.is_empty());
    }

    #[test]
    fn test_rating_token_kept_verbatim() {
        let html = FILM_PAGE.replace("4.15 out of 5", "3.9 out of 5");
        let details = parse_film_details(&html, &FilmDataScript);
        assert_eq!(details.average_rating.as_deref(), Some("3.9"));

        let html = FILM_PAGE.replace("4.15 out of 5", "unrated");
        let details = parse_film_details(&html, &FilmDataScript);
        assert_eq!(details.average_rating.as_deref(), Some("unrated"));
    }

    struct FixedRuntime;

    impl RuntimeExtractor for FixedRuntime {
        fn extract(&self, _document: &Html) -> Option<Runtime> {
            Some(Runtime(90))
        }
    }

    #[test]
    fn test_runtime_strategy_is_swappable() {
        let details = parse_film_details("<html></html>", &FixedRuntime);
        assert_eq!(details.runtime, Some(Runtime(90)));
        assert_eq!(details.year, None);
    }
}
