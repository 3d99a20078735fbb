//! Placeholder apps whose real data sources (wallet providers, on-chain listings) live outside the
//! shell.

use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WalletRow {
    symbol: &'static str,
    label: &'static str,
}

const WALLET_ROWS: [WalletRow; 3] = [
    WalletRow {
        symbol: "ETH",
        label: "Ether",
    },
    WalletRow {
        symbol: "ARENA",
        label: "Arena tokens",
    },
    WalletRow {
        symbol: "NFT",
        label: "Characters",
    },
];

#[component]
pub fn WalletApp() -> impl IntoView {
    view! {
        <div class="app-shell app-wallet">
            <div class="app-toolbar" role="group" aria-label="Wallet controls">
                <button type="button" class="app-action" disabled=true>"Connect wallet"</button>
            </div>
            <table class="wallet-balances">
                <tbody>
                    {WALLET_ROWS
                        .into_iter()
                        .map(|row| {
                            view! {
                                <tr>
                                    <td>{row.label}</td>
                                    <td class="wallet-amount">{format!("-- {}", row.symbol)}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
            <div class="app-statusbar">
                <span>"Status: no wallet provider connected"</span>
            </div>
        </div>
    }
}

#[component]
pub fn MarketplaceApp() -> impl IntoView {
    view! {
        <div class="app-shell app-marketplace">
            <p><strong>"Marketplace"</strong></p>
            <p>"Trading opens in a later season."</p>
        </div>
    }
}

#[component]
/// Shown when a persisted or linked app key has no renderer in this build.
pub fn UnknownApp(app_key: String) -> impl IntoView {
    view! {
        <div class="app-shell app-unknown">
            <p>{format!("No app is registered for `{app_key}`.")}</p>
        </div>
    }
}
