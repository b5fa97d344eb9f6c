//! Outbound SOAP 1.1 envelope construction.
//!
//! Envelopes are built by hand rather than through a generated binding:
//! the upstream contract is small (two operations) and its WSDL is not
//! trustworthy enough to codegen against. Data-contract fields must appear
//! in the WCF serializer's alphabetical order under the `a:` prefix.

use crate::model::query::SearchQuery;

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const TEMPURI_NS: &str = "http://tempuri.org/";
pub const DATA_CONTRACT_NS: &str = "http://schemas.datacontract.org/2004/07/FreeWebService";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Envelope for the parameterless GetToken operation.
pub fn get_token_envelope() -> String {
    format!(
        r#"<s:Envelope xmlns:s="{SOAP_ENV_NS}"><s:Body><GetToken xmlns="{TEMPURI_NS}"/></s:Body></s:Envelope>"#
    )
}

/// Envelope for the Search operation.
///
/// Absent optional filters are omitted outright; the upstream accepts
/// omission, and it is more robust than emitting `i:nil` markers. Field
/// order within the model element is fixed: NumarPagina, RezultatePagina,
/// SearchAn, SearchNumar, SearchText, SearchTitlu.
pub fn search_envelope(query: &SearchQuery, token: &str) -> String {
    let mut model = String::new();
    model.push_str(&format!("<a:NumarPagina>{}</a:NumarPagina>", query.page));
    model.push_str(&format!("<a:RezultatePagina>{}</a:RezultatePagina>", query.per_page));
    if let Some(year) = &query.year {
        model.push_str(&format!("<a:SearchAn>{}</a:SearchAn>", xml_escape(year)));
    }
    if let Some(number) = &query.number {
        model.push_str(&format!("<a:SearchNumar>{}</a:SearchNumar>", xml_escape(number)));
    }
    if let Some(text) = &query.text {
        model.push_str(&format!("<a:SearchText>{}</a:SearchText>", xml_escape(text)));
    }
    if let Some(title) = &query.title {
        model.push_str(&format!("<a:SearchTitlu>{}</a:SearchTitlu>", xml_escape(title)));
    }

    format!(
        r#"<s:Envelope xmlns:s="{SOAP_ENV_NS}"><s:Body><Search xmlns="{TEMPURI_NS}"><model xmlns:a="{DATA_CONTRACT_NS}" xmlns:i="{XSI_NS}">{model}</model><token>{token}</token></Search></s:Body></s:Envelope>"#,
        token = xml_escape(token),
    )
}

pub fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
