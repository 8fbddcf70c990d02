// Desk3 operation table
//
// One entry per upstream endpoint. Tool names, resource URIs and
// descriptions are what clients see, so they are kept stable.

use super::{HttpMethod, Operation, ParamSpec, ResourceSpec, ToolSpec};

const NO_PARAMS: &[ParamSpec] = &[];

const CHAIN_ID: &[ParamSpec] = &[ParamSpec {
    name: "chainid",
    required: true,
    pattern: Some("^[0-9]+$"),
    description: "Chain ID for the blockchain network (e.g., 1 for Ethereum mainnet, 137 for Polygon)",
    examples: &["1", "137", "56", "42161"],
}];

const SYMBOL: &[ParamSpec] = &[ParamSpec {
    name: "symbol",
    required: false,
    pattern: Some("^[A-Z0-9]+$"),
    description: "Trading pair symbol in format like BTCUSDT, ETHUSDT, etc. Leave empty to get all symbols",
    examples: &["BTCUSDT", "ETHUSDT", "BNBUSDT"],
}];

const FEAR_GREED: &str = "Discover our Fear and Greed Index, a powerful tool that analyzes market sentiment to help you make informed crypto investment decisions. Stay ahead of market trends with real-time and historical data available through our easy-to-use API";
const BTC_TREND: &str = "Get the BTC trend chart for the past 3 months. Format: [[date, price, active addresses, new addresses, transaction addresses]]";
const ETH_TREND: &str = "Get the ETH trend chart for the past three months. Format: [[date, price, active addresses, new addresses]]";
const ALTCOIN_SEASON: &str = "Altcoin Season Index page provides real-time insights into whether the cryptocurrency market is currently in Altcoin Season, based on the performance of the top 100 altcoins relative to Bitcoin over the past 90 days, with detailed charts and metrics for tracking market trends and altcoin dominance";
const BITCOIN_DOMINANCE: &str = "Bitcoin (BTC) dominance is a metric used to measure the relative market share or dominance of Bitcoin in the overall cryptocurrency sector. It represents the percentage of Bitcoin's total market capitalization compared to the total market capitalization of all cryptocurrencies combined";
const PI_CYCLE_TOP: &str = "The Pi Cycle Top indicator uses the 111DMA and 2x350DMA to identify Bitcoin market tops. When the 111DMA crosses above the 2x350DMA, it historically typically signals a cycle peak within about 3 days, reflecting Bitcoin's long-term cyclical behavior";
const RAINBOW: &str = "The Bitcoin Rainbow Chart uses a logarithmic growth curve with a color band to illustrate market sentiment and highlight potential buy or sell areas. It is not suitable for short-term predictions, but helps to identify overvaluation or undervaluation from history";
const PUELL_MULTIPLE: &str = "The Puell Multiple assesses Bitcoin miners' revenue by dividing daily issuance (in USD) by its 365-day average. This reflects the mining pressure in the market. Low values (green areas) indicate undervaluation and strong historical buy areas, while high values (red areas) indicate overvaluation and potential sell opportunities. It provides insight into market cycles from the perspective of miners";
const CYCLES: &str = "Does the Bitcoin Four-Year Cycle Exist? Discover the cryptocurrency market cycle indicator that helps you identify the top of the cryptocurrency bull market. This is a collection of publicly available signals including Pi Cycle and Puell Multiple data. Return fields: (puellMultiple Puell: multiple status / piCycleTop: Pi cycle top status / likelihood: cryptocurrency market cycle top indicator)";

/// Every operation the server exposes
pub static OPERATIONS: &[Operation] = &[
    Operation {
        id: "suggest_gas",
        method: HttpMethod::Get,
        path: "/price/getSuggestGas",
        params: CHAIN_ID,
        description: "EIP1559 estimated gas information and trend for a chain",
        resource: Some(ResourceSpec {
            uri: "desk3://gas/suggest",
            name: "EIP1559 Gas Suggestion",
            description: "Get EIP1559 gas suggestion for a given chainid. Use ?chainid=1 for Ethereum mainnet, ?chainid=137 for Polygon",
        }),
        tool: Some(ToolSpec {
            name: "get_suggest_gas",
            description: "Get EIP1559 estimated gas info (chainid required)",
        }),
    },
    Operation {
        id: "exchange_rate",
        method: HttpMethod::Get,
        path: "/market/exchangeRate",
        params: NO_PARAMS,
        description: "Fiat currency exchange rates",
        resource: Some(ResourceSpec {
            uri: "desk3://market/exchangeRate",
            name: "Fiat Exchange Rate List",
            description: "List of foreign currency exchange rates",
        }),
        tool: Some(ToolSpec {
            name: "get_exchange_rate",
            description: "Get list of fiat currency exchange rates",
        }),
    },
    Operation {
        id: "mini_24hr",
        method: HttpMethod::Get,
        path: "/market/mini/24hr",
        params: SYMBOL,
        description: "24-hour mini ticker information",
        resource: Some(ResourceSpec {
            uri: "desk3://market/mini/24hr",
            name: "24hr Mini Ticker",
            description: "24-hour currency price Mini information, supports symbol parameters like BTCUSDT, ETHUSDT. Use ?symbol=BTCUSDT to get specific symbol data",
        }),
        tool: Some(ToolSpec {
            name: "get_mini_24hr",
            description: "Get 24-hour mini ticker info, supports symbol parameter",
        }),
    },
    Operation {
        id: "token_price",
        method: HttpMethod::Get,
        path: "/market/price",
        params: SYMBOL,
        description: "Real-time token price information",
        resource: Some(ResourceSpec {
            uri: "desk3://market/price",
            name: "Token Price Info",
            description: "Get real-time token price information, support symbol parameters like BTCUSDT, ETHUSDT. Use ?symbol=BTCUSDT to get specific symbol data",
        }),
        tool: Some(ToolSpec {
            name: "get_token_price",
            description: "Get real-time token price info, supports symbol parameter",
        }),
    },
    Operation {
        id: "fear_greed",
        method: HttpMethod::Get,
        path: "/market/fear-greed",
        params: NO_PARAMS,
        description: "Crypto fear and greed index",
        resource: Some(ResourceSpec {
            uri: "desk3://market/fear-greed",
            name: "Crypto Fear and Greed Index",
            description: FEAR_GREED,
        }),
        tool: Some(ToolSpec {
            name: "get_fear_greed_index",
            description: FEAR_GREED,
        }),
    },
    Operation {
        id: "btc_trend",
        method: HttpMethod::Get,
        path: "/market/btc/trend",
        params: NO_PARAMS,
        description: "BTC trend chart for the past 3 months",
        resource: Some(ResourceSpec {
            uri: "desk3://market/btc/trend",
            name: "BTC Trend (3 months)",
            description: BTC_TREND,
        }),
        tool: Some(ToolSpec {
            name: "get_btc_trend",
            description: BTC_TREND,
        }),
    },
    Operation {
        id: "eth_trend",
        method: HttpMethod::Get,
        path: "/market/eth/trend",
        params: NO_PARAMS,
        description: "ETH trend chart for the past 3 months",
        resource: Some(ResourceSpec {
            uri: "desk3://market/eth/trend",
            name: "ETH Trend (3 months)",
            description: ETH_TREND,
        }),
        tool: Some(ToolSpec {
            name: "get_eth_trend",
            description: ETH_TREND,
        }),
    },
    Operation {
        id: "altcoin_season",
        method: HttpMethod::Get,
        path: "/market/altcoin/season",
        params: NO_PARAMS,
        description: "Altcoin Season Index",
        resource: Some(ResourceSpec {
            uri: "desk3://market/altcoin/season",
            name: "Altcoin Season Index",
            description: ALTCOIN_SEASON,
        }),
        tool: Some(ToolSpec {
            name: "get_altcoin_season_index",
            description: ALTCOIN_SEASON,
        }),
    },
    Operation {
        id: "bitcoin_dominance",
        method: HttpMethod::Get,
        path: "/market/bitcoin/dominance",
        params: NO_PARAMS,
        description: "Bitcoin market dominance",
        resource: Some(ResourceSpec {
            uri: "desk3://market/bitcoin/dominance",
            name: "Bitcoin Dominance",
            description: BITCOIN_DOMINANCE,
        }),
        tool: Some(ToolSpec {
            name: "get_bitcoin_dominance",
            description: BITCOIN_DOMINANCE,
        }),
    },
    Operation {
        id: "cycle_indicators",
        method: HttpMethod::Get,
        path: "/market/cycleIndicators",
        params: NO_PARAMS,
        description: "Crypto market cycle top indicators",
        resource: Some(ResourceSpec {
            uri: "desk3://market/cycle/indicators",
            name: "Crypto Market Cycle Top Indicators",
            description: "Get crypto market cycle top indicators with fields (Indicator/Current/24h%/ReferencePrice/Triggered). Provides comprehensive market cycle analysis including Bitcoin Ahr999 Index, Pi Cycle Top Indicator, Puell Multiple, and more",
        }),
        tool: Some(ToolSpec {
            name: "get_cycle_indicators",
            description: "Get crypto market cycle top indicators with fields (Indicator/Current/24h%/ReferencePrice/Triggered). Provides comprehensive market cycle analysis including Bitcoin Ahr999 Index, Pi Cycle Top Indicator, Puell Multiple, Bitcoin Rainbow Chart, and more",
        }),
    },
    Operation {
        id: "pi_cycle_top",
        method: HttpMethod::Get,
        path: "/market/pi-cycle-top",
        params: NO_PARAMS,
        description: "BTC Pi Cycle Top indicator",
        resource: Some(ResourceSpec {
            uri: "desk3://market/pi-cycle-top",
            name: "BTC Pi Cycle Top Indicator",
            description: PI_CYCLE_TOP,
        }),
        tool: Some(ToolSpec {
            name: "get_pi_cycle_top",
            description: PI_CYCLE_TOP,
        }),
    },
    Operation {
        id: "rainbow_chart",
        method: HttpMethod::Get,
        path: "/market/rainbow",
        params: NO_PARAMS,
        description: "Bitcoin Rainbow Price Chart",
        resource: Some(ResourceSpec {
            uri: "desk3://market/rainbow",
            name: "Bitcoin Rainbow Price Chart",
            description: RAINBOW,
        }),
        tool: Some(ToolSpec {
            name: "get_rainbow_chart",
            description: RAINBOW,
        }),
    },
    Operation {
        id: "puell_multiple",
        method: HttpMethod::Get,
        path: "/market/puell-multiple",
        params: NO_PARAMS,
        description: "Puell Multiple",
        resource: Some(ResourceSpec {
            uri: "desk3://market/puell-multiple",
            name: "Puell Multiple",
            description: PUELL_MULTIPLE,
        }),
        tool: Some(ToolSpec {
            name: "get_puell_multiple",
            description: PUELL_MULTIPLE,
        }),
    },
    Operation {
        id: "cycles",
        method: HttpMethod::Get,
        path: "/market/cycles",
        params: NO_PARAMS,
        description: "Simple cycle indicators (Puell Multiple, Pi Cycle Top, cycle top likelihood)",
        resource: Some(ResourceSpec {
            uri: "desk3://market/cycles",
            name: "Simple indicators: Puell Multiple Status/Pi Cycle Top Status/Crypto Market Cycle Top Indicator",
            description: CYCLES,
        }),
        tool: Some(ToolSpec {
            name: "get_cycles",
            description: CYCLES,
        }),
    },
];
