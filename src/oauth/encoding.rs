//! RFC 3986 percent-encoding and the normalization steps of RFC 5849 section 3.4.1.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
// self
use crate::_prelude::*;

/// Everything except `ALPHA / DIGIT / "-" / "." / "_" / "~"` is escaped.
const OAUTH_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes `input` with the OAuth 1.0a rules: unreserved characters pass through,
/// every other byte of the UTF-8 form becomes `%XX` with uppercase hex. Spaces become `%20`,
/// never `+`.
pub fn percent_encode(input: &str) -> String {
	utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Builds the normalized parameter string: every key and value encoded, pairs sorted by
/// encoded key then encoded value, joined as `k=v` with `&`.
///
/// Duplicate keys are allowed here so the routine matches RFC 5849 examples; callers that
/// need unique keys enforce that before getting here.
pub fn normalize_parameters<'a, I>(pairs: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let mut encoded = pairs
		.into_iter()
		.map(|(key, value)| (percent_encode(key), percent_encode(value)))
		.collect::<Vec<_>>();

	encoded.sort();

	let mut buf = String::new();

	for (idx, (key, value)) in encoded.iter().enumerate() {
		if idx > 0 {
			buf.push('&');
		}

		buf.push_str(key);
		buf.push('=');
		buf.push_str(value);
	}

	buf
}

/// Returns the base string URI: lowercase scheme and host, default port dropped, no query or
/// fragment.
pub fn base_string_uri(url: &Url) -> String {
	let mut uri = url.clone();

	uri.set_query(None);
	uri.set_fragment(None);

	uri.to_string()
}

/// Concatenates `METHOD&enc(uri)&enc(params)`.
pub fn signature_base_string(method: &str, base_uri: &str, parameter_string: &str) -> String {
	format!(
		"{}&{}&{}",
		method.to_ascii_uppercase(),
		percent_encode(base_uri),
		percent_encode(parameter_string)
	)
}

#[cfg(test)]
mod tests {
	// crates.io
	use percent_encoding::percent_decode_str;
	// self
	use super::*;

	#[test]
	fn percent_encoding_matches_published_examples() {
		assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
		assert_eq!(percent_encode("An encoded string!"), "An%20encoded%20string%21");
		assert_eq!(percent_encode("Dogs, Cats & Mice"), "Dogs%2C%20Cats%20%26%20Mice");
		assert_eq!(percent_encode("☃"), "%E2%98%83");
		assert_eq!(percent_encode("AZaz09-._~"), "AZaz09-._~");
	}

	#[test]
	fn base_string_uri_normalizes_scheme_host_and_port() {
		let url = Url::parse("HTTP://EXAMPLE.COM:80/r%20v/X?id=123")
			.expect("Test URL should parse.");

		assert_eq!(base_string_uri(&url), "http://example.com/r%20v/X");

		let url =
			Url::parse("https://www.example.net:8080/?q=1#frag").expect("Test URL should parse.");

		assert_eq!(base_string_uri(&url), "https://www.example.net:8080/");
	}

	#[test]
	fn normalization_matches_rfc5849_example() {
		let pairs = [
			("b5", "=%3D"),
			("a3", "a"),
			("c@", ""),
			("a2", "r b"),
			("oauth_consumer_key", "9djdj82h48djs9d2"),
			("oauth_token", "kkk9d7dh3k39sjv7"),
			("oauth_signature_method", "HMAC-SHA1"),
			("oauth_timestamp", "137131201"),
			("oauth_nonce", "7d8f3e4a"),
			("c2", ""),
			("a3", "2 q"),
		];

		assert_eq!(
			normalize_parameters(pairs),
			concat!(
				"a2=r%20b&a3=2%20q&a3=a&b5=%3D%253D&c%40=&c2=&oauth_consumer_key=9dj",
				"dj82h48djs9d2&oauth_nonce=7d8f3e4a&oauth_signature_method=HMAC-SHA1",
				"&oauth_timestamp=137131201&oauth_token=kkk9d7dh3k39sjv7"
			)
		);
	}

	#[test]
	fn normalized_parameters_decode_back_to_the_original_set() {
		let original = BTreeMap::from([
			("q".to_owned(), "cats & dogs".to_owned()),
			("expr".to_owned(), "a=b+c".to_owned()),
			("lang".to_owned(), "日本語 ☃".to_owned()),
			("sp ace".to_owned(), "100%".to_owned()),
			("empty".to_owned(), String::new()),
		]);
		let normalized =
			normalize_parameters(original.iter().map(|(k, v)| (k.as_str(), v.as_str())));
		let decoded = normalized
			.split('&')
			.map(|pair| {
				let (key, value) = pair.split_once('=').expect("Every pair carries `=`.");
				let decode = |s: &str| {
					percent_decode_str(s).decode_utf8().expect("Pairs decode as UTF-8.").into_owned()
				};

				(decode(key), decode(value))
			})
			.collect::<BTreeMap<_, _>>();

		assert!(!normalized.contains(' '));
		assert!(!normalized.contains('+'));
		assert_eq!(decoded, original);
	}

	#[test]
	fn base_string_uppercases_method() {
		assert_eq!(
			signature_base_string("get", "https://api.twitter.com/1.1/a.json", "a=b"),
			"GET&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fa.json&a%3Db"
		);
	}
}
