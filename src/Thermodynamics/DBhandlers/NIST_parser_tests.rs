#[cfg(test)]
mod tests {
    use crate::Thermodynamics::DBhandlers::NIST_parser::{
        HttpClient, NistError, NistParser, Phase,
    };
    use crate::Thermodynamics::DBhandlers::lookup_api::{LookupError, SpeciesLookupSource};
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::collections::HashMap;

    const WATER_SEARCH: &str = "https://webbook.nist.gov/cgi/cbook.cgi?Formula=H2O&NoIon=on&Units=SI";
    const WATER_PAGE: &str = "https://webbook.nist.gov/cgi/cbook.cgi?ID=C7732185&Units=SI";
    const WATER_GAS: &str = "https://webbook.nist.gov/cgi/cbook.cgi?ID=C7732185&Units=SI&Mask=1";

    // Mock HTTP client for testing: url -> html, every request is recorded
    #[derive(Default)]
    struct MockHttpClient {
        responses: HashMap<String, String>,
        requested: RefCell<Vec<String>>,
    }

    impl MockHttpClient {
        fn mock_response(mut self, url: &str, html: &str) -> Self {
            self.responses.insert(url.to_string(), html.to_string());
            self
        }
    }

    impl HttpClient for MockHttpClient {
        fn get_text(&self, url: &str) -> Result<String, NistError> {
            self.requested.borrow_mut().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| NistError::RequestFailed(format!("no route to {}", url)))
        }
    }

    fn search_page() -> String {
        r#"<html><body><h1>Search Results</h1>
        <ol><li><a href="/cgi/cbook.cgi?ID=C7732185&amp;Units=SI">Water</a> H2O</li>
        <li><a href="/cgi/cbook.cgi?ID=C13463399&amp;Units=SI">Deuterium oxide</a></li></ol>
        </body></html>"#
            .to_string()
    }

    fn substance_page() -> String {
        r#"<html><body><h1 id="Top">Water</h1><ul>
        <li><a href="/cgi/cbook.cgi?ID=C7732185&amp;Units=SI&amp;Mask=1">Gas phase thermochemistry data</a></li>
        <li><a href="/cgi/cbook.cgi?ID=C7732185&amp;Units=SI&amp;Mask=2">Condensed phase thermochemistry data</a></li>
        </ul></body></html>"#
            .to_string()
    }

    fn gas_page() -> String {
        r#"<html><body><h1>Water</h1>
        <table aria-label="One dimensional data">
        <tr><th>Quantity</th><th>Value</th><th>Units</th></tr>
        <tr><td>Δ<sub>f</sub>H°<sub>gas</sub></td><td>-241.826 ± 0.040</td><td>kJ/mol</td></tr>
        <tr><td>S°<sub>gas,1 bar</sub></td><td>188.84 ± 0.01</td><td>J/mol*K</td></tr>
        </table></body></html>"#
            .to_string()
    }

    fn water_client() -> MockHttpClient {
        MockHttpClient::default()
            .mock_response(WATER_SEARCH, &search_page())
            .mock_response(WATER_PAGE, &substance_page())
            .mock_response(WATER_GAS, &gas_page())
    }

    #[test]
    fn test_url_construction() {
        let parser = NistParser::with_client(MockHttpClient::default());

        let cas_url = parser.construct_url("7732-18-5").unwrap();
        assert_eq!(
            cas_url.as_str(),
            "https://webbook.nist.gov/cgi/cbook.cgi?ID=7732-18-5&Units=SI"
        );

        let formula_url = parser.construct_url("H2O").unwrap();
        assert_eq!(formula_url.as_str(), WATER_SEARCH);

        // formulas without digits are still formulas
        let co_url = parser.construct_url("CO").unwrap();
        assert_eq!(
            co_url.as_str(),
            "https://webbook.nist.gov/cgi/cbook.cgi?Formula=CO&NoIon=on&Units=SI"
        );

        let name_url = parser.construct_url("Water").unwrap();
        assert_eq!(
            name_url.as_str(),
            "https://webbook.nist.gov/cgi/cbook.cgi?Name=Water&Units=SI"
        );

        let space_url = parser.construct_url("Carbon dioxide").unwrap();
        assert_eq!(
            space_url.as_str(),
            "https://webbook.nist.gov/cgi/cbook.cgi?Name=Carbondioxide&Units=SI"
        );
    }

    #[test]
    fn test_phase_conversion() {
        assert_eq!(Phase::Gas.as_str(), "gas");
        assert_eq!(Phase::Solid.as_str(), "solid");
        assert_eq!(Phase::default(), Phase::Gas);
        let phase: Phase = serde_json::from_str("\"liquid\"").unwrap();
        assert_eq!(phase, Phase::Liquid);
    }

    #[test]
    fn test_mocked_water_walk() {
        let parser = NistParser::with_client(water_client());
        let record = parser.get_data("H2O").unwrap();
        assert_relative_eq!(record.delta_hf_kj_per_mol.unwrap(), -241.826);
        // entropy normalised to kJ/mol*K
        assert_relative_eq!(record.s_kj_per_mol_k.unwrap(), 0.18884, epsilon = 1e-12);
        assert_eq!(
            parser.client().requested.borrow().clone(),
            vec![WATER_SEARCH.to_string(), WATER_PAGE.to_string(), WATER_GAS.to_string()]
        );
    }

    #[test]
    fn test_unique_hit_lands_on_substance_page() {
        // no search list: the formula page is already the substance page
        let url = "https://webbook.nist.gov/cgi/cbook.cgi?Formula=CH4&NoIon=on&Units=SI";
        let data_url = "https://webbook.nist.gov/cgi/cbook.cgi?ID=C74828&Units=SI&Mask=1";
        let client = MockHttpClient::default()
            .mock_response(
                url,
                r#"<h1>Methane</h1><a href="/cgi/cbook.cgi?ID=C74828&amp;Units=SI&amp;Mask=1">Gas phase thermochemistry data</a>"#,
            )
            .mock_response(
                data_url,
                r#"<table><tr><td>ΔfH°gas</td><td>-74.87</td><td>kJ/mol</td></tr>
                <tr><td>S°gas,1 bar</td><td>186.25 ± 0.21</td><td>J/mol*K</td></tr></table>"#,
            );
        let mut parser = NistParser::with_client(client);
        let record = parser.lookup("CH4").unwrap();
        assert!(record.is_complete());
        assert_relative_eq!(record.s_kj_per_mol_k.unwrap(), 0.18625, epsilon = 1e-12);
    }

    #[test]
    fn test_condensed_phase_rows() {
        let url = "https://webbook.nist.gov/cgi/cbook.cgi?Formula=CaCO3&NoIon=on&Units=SI";
        let client = MockHttpClient::default().mock_response(
            url,
            r#"<h1>Calcium carbonate</h1><table>
            <tr><td>ΔfH°gas</td><td>-1000.0</td><td>kJ/mol</td></tr>
            <tr><td>ΔfH°solid</td><td>-1207.6 ± 1.3</td><td>kJ/mol</td></tr>
            <tr><td>S°solid,1 bar</td><td>91.7</td><td>J/mol*K</td></tr></table>"#,
        );
        let parser = NistParser::with_client(client).with_phase(Phase::Solid);
        let record = parser.get_data("CaCO3").unwrap();
        assert_relative_eq!(record.delta_hf_kj_per_mol.unwrap(), -1207.6);
        assert_relative_eq!(record.s_kj_per_mol_k.unwrap(), 0.0917, epsilon = 1e-12);
    }

    #[test]
    fn test_partial_page_gives_partial_record() {
        let url = "https://webbook.nist.gov/cgi/cbook.cgi?Formula=O3&NoIon=on&Units=SI";
        let client = MockHttpClient::default().mock_response(
            url,
            r#"<h1>Ozone</h1><table><tr><td>ΔfH°gas</td><td>142.67</td><td>kJ/mol</td></tr></table>"#,
        );
        let mut parser = NistParser::with_client(client);
        let record = parser.lookup("O3").unwrap();
        assert_eq!(record.delta_hf_kj_per_mol, Some(142.67));
        assert_eq!(record.s_kj_per_mol_k, None);
    }

    #[test]
    fn test_nonexistent_substance() {
        let url = "https://webbook.nist.gov/cgi/cbook.cgi?Formula=XeF9&NoIon=on&Units=SI";
        let client = MockHttpClient::default()
            .mock_response(url, "<html><h1>Formula Not Found</h1></html>");
        let mut parser = NistParser::with_client(client);
        assert!(matches!(
            parser.get_data("XeF9"),
            Err(NistError::SubstanceNotFound)
        ));
        // a definitive "no data" answer, not a failure
        assert!(parser.lookup("XeF9").unwrap().is_unresolved());
    }

    #[test]
    fn test_network_error_is_unavailable() {
        let mut parser = NistParser::with_client(MockHttpClient::default());
        assert!(matches!(
            parser.lookup("H2O"),
            Err(LookupError::Unavailable(_))
        ));
    }
}
