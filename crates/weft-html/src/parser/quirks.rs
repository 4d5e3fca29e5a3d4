//! Document mode detection from the DOCTYPE token.
//!
//! [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)

use weft_dom::QuirksMode;

/// "The public identifier is set to..." (exact, case-insensitive).
const QUIRKS_PUBLIC_ID_EQ: &[&str] = &[
    "-//w3o//dtd w3 html strict 3.0//en//",
    "-/w3c/dtd html 4.0 transitional/en",
    "html",
];

/// "The public identifier starts with..."
const QUIRKS_PUBLIC_ID_PREFIXES: &[&str] = &[
    "+//silmaril//dtd html pro v0r11 19970101//",
    "-//as//dtd html 3.0 aswedit + extensions//",
    "-//advasoft ltd//dtd html 3.0 aswedit + extensions//",
    "-//ietf//dtd html 2.0 level 1//",
    "-//ietf//dtd html 2.0 level 2//",
    "-//ietf//dtd html 2.0 strict level 1//",
    "-//ietf//dtd html 2.0 strict level 2//",
    "-//ietf//dtd html 2.0 strict//",
    "-//ietf//dtd html 2.0//",
    "-//ietf//dtd html 2.1e//",
    "-//ietf//dtd html 3.0//",
    "-//ietf//dtd html 3.2 final//",
    "-//ietf//dtd html 3.2//",
    "-//ietf//dtd html 3//",
    "-//ietf//dtd html level 0//",
    "-//ietf//dtd html level 1//",
    "-//ietf//dtd html level 2//",
    "-//ietf//dtd html level 3//",
    "-//ietf//dtd html strict level 0//",
    "-//ietf//dtd html strict level 1//",
    "-//ietf//dtd html strict level 2//",
    "-//ietf//dtd html strict level 3//",
    "-//ietf//dtd html strict//",
    "-//ietf//dtd html//",
    "-//metrius//dtd metrius presentational//",
    "-//microsoft//dtd internet explorer 2.0 html strict//",
    "-//microsoft//dtd internet explorer 2.0 html//",
    "-//microsoft//dtd internet explorer 2.0 tables//",
    "-//microsoft//dtd internet explorer 3.0 html strict//",
    "-//microsoft//dtd internet explorer 3.0 html//",
    "-//microsoft//dtd internet explorer 3.0 tables//",
    "-//netscape comm. corp.//dtd html//",
    "-//netscape comm. corp.//dtd strict html//",
    "-//o'reilly and associates//dtd html 2.0//",
    "-//o'reilly and associates//dtd html extended 1.0//",
    "-//o'reilly and associates//dtd html extended relaxed 1.0//",
    "-//sq//dtd html 2.0 hotmetal + extensions//",
    "-//softquad software//dtd hotmetal pro 6.0::19990601::extensions to html 4.0//",
    "-//softquad//dtd hotmetal pro 4.0::19971010::extensions to html 4.0//",
    "-//spyglass//dtd html 2.0 extended//",
    "-//sun microsystems corp.//dtd hotjava html//",
    "-//sun microsystems corp.//dtd hotjava strict html//",
    "-//w3c//dtd html 3 1995-03-24//",
    "-//w3c//dtd html 3.2 draft//",
    "-//w3c//dtd html 3.2 final//",
    "-//w3c//dtd html 3.2//",
    "-//w3c//dtd html 3.2s draft//",
    "-//w3c//dtd html 4.0 frameset//",
    "-//w3c//dtd html 4.0 transitional//",
    "-//w3c//dtd html experimental 19960712//",
    "-//w3c//dtd html experimental 970421//",
    "-//w3c//dtd w3 html//",
    "-//w3o//dtd w3 html 3.0//",
    "-//webtechs//dtd mozilla html 2.0//",
    "-//webtechs//dtd mozilla html//",
];

/// Quirky without a system identifier, limited-quirks with one.
const HTML4_PUBLIC_ID_PREFIXES: &[&str] = &[
    "-//w3c//dtd html 4.01 frameset//",
    "-//w3c//dtd html 4.01 transitional//",
];

const LIMITED_QUIRKS_PUBLIC_ID_PREFIXES: &[&str] = &[
    "-//w3c//dtd xhtml 1.0 frameset//",
    "-//w3c//dtd xhtml 1.0 transitional//",
];

const QUIRKS_SYSTEM_ID: &str = "http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd";

fn starts_with_any(id: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| id.starts_with(prefix))
}

/// Pick the document mode for a DOCTYPE token.
///
/// Identifier comparisons are ASCII case-insensitive.
#[must_use]
pub fn document_mode(
    name: Option<&str>,
    public_id: Option<&str>,
    system_id: Option<&str>,
    force_quirks: bool,
) -> QuirksMode {
    // "The force-quirks flag is set to on. The name is not "html"."
    if force_quirks || name != Some("html") {
        return QuirksMode::Quirks;
    }

    let public_id = public_id.map(str::to_ascii_lowercase);
    let system_id = system_id.map(str::to_ascii_lowercase);

    if system_id.as_deref() == Some(QUIRKS_SYSTEM_ID) {
        return QuirksMode::Quirks;
    }

    let Some(public_id) = public_id else {
        return QuirksMode::NoQuirks;
    };

    if QUIRKS_PUBLIC_ID_EQ.contains(&public_id.as_str())
        || starts_with_any(&public_id, QUIRKS_PUBLIC_ID_PREFIXES)
        || (system_id.is_none() && starts_with_any(&public_id, HTML4_PUBLIC_ID_PREFIXES))
    {
        return QuirksMode::Quirks;
    }

    if starts_with_any(&public_id, LIMITED_QUIRKS_PUBLIC_ID_PREFIXES)
        || (system_id.is_some() && starts_with_any(&public_id, HTML4_PUBLIC_ID_PREFIXES))
    {
        return QuirksMode::LimitedQuirks;
    }

    QuirksMode::NoQuirks
}

/// "If the DOCTYPE token's name is not "html", or the token's public
/// identifier is not missing, or the token's system identifier is neither
/// missing nor "about:legacy-compat", then there is a parse error."
#[must_use]
pub fn is_conforming_doctype(
    name: Option<&str>,
    public_id: Option<&str>,
    system_id: Option<&str>,
) -> bool {
    name == Some("html")
        && public_id.is_none()
        && system_id.is_none_or(|id| id == "about:legacy-compat")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html5_doctype_is_no_quirks() {
        assert_eq!(document_mode(Some("html"), None, None, false), QuirksMode::NoQuirks);
        assert!(is_conforming_doctype(Some("html"), None, None));
        assert!(is_conforming_doctype(Some("html"), None, Some("about:legacy-compat")));
    }

    #[test]
    fn missing_or_foreign_name_is_quirks() {
        assert_eq!(document_mode(None, None, None, false), QuirksMode::Quirks);
        assert_eq!(document_mode(Some("svg"), None, None, false), QuirksMode::Quirks);
        assert_eq!(document_mode(Some("html"), None, None, true), QuirksMode::Quirks);
    }

    #[test]
    fn public_identifier_prefixes() {
        assert_eq!(
            document_mode(Some("html"), Some("-//W3C//DTD HTML 4.0 Transitional//EN"), None, false),
            QuirksMode::Quirks
        );
        assert_eq!(
            document_mode(Some("html"), Some("HTML"), None, false),
            QuirksMode::Quirks
        );
        assert_eq!(
            document_mode(
                Some("html"),
                Some("-//W3C//DTD XHTML 1.0 Transitional//EN"),
                Some("http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd"),
                false
            ),
            QuirksMode::LimitedQuirks
        );
    }

    #[test]
    fn html401_depends_on_system_identifier() {
        let public = Some("-//W3C//DTD HTML 4.01 Transitional//EN");
        assert_eq!(document_mode(Some("html"), public, None, false), QuirksMode::Quirks);
        assert_eq!(
            document_mode(Some("html"), public, Some("http://www.w3.org/TR/html4/loose.dtd"), false),
            QuirksMode::LimitedQuirks
        );
    }

    #[test]
    fn ibm_system_identifier_is_quirks() {
        assert_eq!(
            document_mode(
                Some("html"),
                None,
                Some("http://www.IBM.com/data/dtd/v11/ibmxhtml1-transitional.dtd"),
                false
            ),
            QuirksMode::Quirks
        );
    }
}
