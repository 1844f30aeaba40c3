use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["stockr"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.backend_url.is_none());
}

#[test]
fn parses_dashboard_views() {
    for (arg, expected) in [("dashboard", "Dashboard"), ("kpis", "Kpis"), ("products", "Products")] {
        let cli = Cli::try_parse_from(["stockr", arg]).expect("expected valid cli args");
        let got = format!("{:?}", cli.command.expect("subcommand"));
        assert_eq!(got, expected);
    }
}

#[test]
fn backend_url_is_global() {
    let cli = Cli::try_parse_from(["stockr", "kpis", "--backend-url", "http://inv.local:9000"])
        .expect("expected valid cli args");
    assert_eq!(cli.backend_url.as_deref(), Some("http://inv.local:9000"));
}

#[test]
fn add_defaults_category_and_status() {
    let cli = Cli::try_parse_from(["stockr", "add", "--name", "Dunk Low Panda"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Add {
            ref name,
            category: Category::Sneaker,
            status: ProductStatus::InStock,
            price: None,
            date: None,
            sku: None,
            variant: None,
            image_url: None,
        }) if name == "Dunk Low Panda"
    ));
}

#[test]
fn add_parses_all_fields() {
    let cli = Cli::try_parse_from([
        "stockr",
        "add",
        "--name",
        "Charizard",
        "--sku",
        "BS-4",
        "--variant",
        "PSA 9",
        "--category",
        "tcg",
        "--price",
        "350.00",
        "--date",
        "2025-03-01",
        "--status",
        "listed",
        "--image-url",
        "https://img.example.com/zard.png",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Add {
            name,
            sku,
            variant,
            category,
            price,
            date,
            status,
            image_url,
        }) => {
            assert_eq!(name, "Charizard");
            assert_eq!(sku.as_deref(), Some("BS-4"));
            assert_eq!(variant.as_deref(), Some("PSA 9"));
            assert_eq!(category, Category::Tcg);
            assert_eq!(price.as_deref(), Some("350.00"));
            assert_eq!(date.as_deref(), Some("2025-03-01"));
            assert_eq!(status, ProductStatus::Listed);
            assert_eq!(image_url.as_deref(), Some("https://img.example.com/zard.png"));
        }
        other => panic!("expected add command, got {other:?}"),
    }
}

#[test]
fn add_requires_name() {
    assert!(Cli::try_parse_from(["stockr", "add"]).is_err());
}

#[test]
fn add_rejects_unknown_category() {
    assert!(Cli::try_parse_from(["stockr", "add", "--name", "X", "--category", "Vinyl"]).is_err());
}

#[test]
fn breakeven_takes_free_text() {
    let cli = Cli::try_parse_from(["stockr", "breakeven", "abc"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Breakeven { ref price }) if price == "abc"
    ));
}
