//! Command-line arguments of the `storefront-preview` harness.

use clap::Parser;

use crate::intent::Intent;

/// Bootstrap the storefront natively, replay intents and print the HTML.
#[derive(Debug, Parser)]
#[command(name = "storefront-preview")]
#[command(about = "Render the storefront widget after replaying user intents")]
pub struct PreviewArgs {
    /// Intents to apply in order: `search=TEXT`, `sort=KEY`, `page=N`,
    /// `prev`, `next`, `toggle=ID`, `open`, `close`.
    #[arg(value_name = "INTENT", value_parser = parse_intent)]
    pub intents: Vec<Intent>,
}

fn parse_intent(arg: &str) -> Result<Intent, String> {
    arg.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use storefront_core::ProductId;
    use storefront_query::SortKey;

    #[test]
    fn parser_builds() {
        PreviewArgs::command().debug_assert();
    }

    #[test]
    fn parses_intents_in_order() {
        let args =
            PreviewArgs::try_parse_from(["storefront-preview", "search=an", "sort=az", "toggle=2", "open"])
                .unwrap();
        assert_eq!(
            args.intents,
            [
                Intent::SetSearch("an".into()),
                Intent::SetSort(SortKey::NameAsc),
                Intent::ToggleCart(ProductId::new(2)),
                Intent::OpenCart,
            ]
        );
    }

    #[test]
    fn no_arguments_means_no_intents() {
        let args = PreviewArgs::try_parse_from(["storefront-preview"]).unwrap();
        assert!(args.intents.is_empty());
    }

    #[test]
    fn rejects_unknown_intents() {
        let err = PreviewArgs::try_parse_from(["storefront-preview", "dance"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
