use crate::{Address, AddressRule, tokenize};

#[test]
fn rule_examples_matching() {
    // (expected, rule, address)
    let cases: Vec<(bool, &str, &str)> = vec![
        // exact, no qualifier
        (true, "10號", "10號"),
        (false, "10號", "10之1號"),
        (false, "10號", "11號"),
        (true, "中山路10號", "臺北市中山路10號"),
        // fixed context must match exactly
        (false, "中山路10號", "中正路10號"),
        (false, "中山路10號以上", "中正路12號"),
        // parity
        (true, "3號單號以上", "5號"),
        (false, "3號單號以上", "4號"),
        (true, "單 3號以上", "3號"),
        (false, "單 3號以上", "1號"),
        (true, "雙 2號以下", "2號"),
        (false, "雙 2號以下", "4號"),
        (true, "中山路單全", "中山路99號"),
        (false, "中山路單全", "中山路98號"),
        (true, "中山路雙全", "中山路98號"),
        // ranges
        (true, "10號至20號", "15號"),
        (false, "10號至20號", "25號"),
        (true, "10號至20號", "10號"),
        (true, "10號至20號", "20號"),
        (false, "10號至20號", "20之1號"),
        (true, "雙 2號至 48號", "48號"),
        (false, "雙 2號至 48號", "47號"),
        (false, "雙 2號至 48號", "50號"),
        (true, "中山路3巷2號至8號", "中山路3巷5號"),
        (false, "中山路3巷2號至8號", "中山路5巷5號"),
        // and above / and below
        (true, "10號以上", "10之3號"),
        (true, "10號以上", "10號"),
        (false, "10號以上", "9之9號"),
        (true, "10號以下", "9之9號"),
        (false, "10號以下", "10之1號"),
        (true, "10號及以上附號", "10之1號"),
        (true, "10號含附號以下", "1號"),
        // sub-numbers
        (true, "10附號全", "10之1號"),
        (false, "10附號全", "10號"),
        (true, "10號含附號", "10之7號"),
        (true, "10號含附號全", "10號"),
        (false, "10號含附號", "11號"),
        // anchored below the road
        (true, "3巷10號以上", "臺北市中山路3巷12號"),
        (false, "3巷10號以上", "臺北市中山路4巷12號"),
        (false, "3巷10號以上", "臺北市中山路12號"),
        // degenerate input fails closed
        (false, "", ""),
        (false, "中山路10號", ""),
        (false, "中山路3巷10號以下", "中山路"),
    ];

    for (expected, rule, address) in cases {
        let rule = AddressRule::new(rule);
        let address = Address::new(address);
        let details = rule.explain(&address);

        assert_eq!(
            details.matched, expected,
            "rule {rule:?} vs address {address:?}: verdict {:?}",
            details.verdict
        );
    }
}

#[test]
fn construction_is_total() {
    let odd_inputs = ["", "號", "之", "-", ",", "，，", "10之", "之3號", "全", "至", "單", "\u{3000}", "abc", "１０號"];
    for text in odd_inputs {
        let address = Address::new(text);
        let rule = AddressRule::new(text);
        let _ = rule.matches(&address);
        let _ = address.trailing_number_pair();
        let _ = rule.number_pair(-2);
    }
    assert!(Address::new("").tokens().is_empty());
}

#[test]
fn tokenization_is_idempotent_on_rendered_tokens() {
    let inputs = [
        "臺中市西屯區臺灣大道三段99號",
        "高雄市苓雅區四維三路2號",
        "南投縣竹山鎮中山路二段1之3號5樓",
        "花蓮縣秀林鄉富世村,1號",
    ];
    for input in inputs {
        let tokens = tokenize(input);
        assert!(!tokens.is_empty(), "{input}");
        let rendered: String = tokens.iter().map(ToString::to_string).collect();
        assert_eq!(tokenize(&rendered), tokens, "{input} -> {rendered}");
    }
}

#[test]
fn rules_are_shareable_across_threads() {
    let rule = std::sync::Arc::new(AddressRule::new("單 1號至 99號"));
    let handles: Vec<_> = (1..=4u64)
        .map(|n| {
            let rule = std::sync::Arc::clone(&rule);
            std::thread::spawn(move || rule.matches(&Address::new(format!("{}號", n * 10 + 1))))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
