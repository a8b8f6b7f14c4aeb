use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Static dashboard page. `__GAME__` and `__DATA_DIR__` are substituted at
/// generation time; everything else runs client-side when the page is opened.
const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>__GAME__ Market Transaction Analysis</title>
  <script src="https://cdn.tailwindcss.com"></script>
  <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
</head>
<body class="bg-gray-100 font-sans">
  <div class="container mx-auto p-4">
    <div id="app" class="bg-white rounded-lg shadow-lg p-6">
      <h1 class="text-3xl font-bold text-blue-800 mb-6 text-center">__GAME__ Market Transaction Analysis</h1>
      <div id="loading" class="text-center text-xl font-semibold text-gray-700 py-10">Loading data...</div>
      <div id="content" class="hidden">
        <section class="mb-8">
          <h2 class="text-2xl font-semibold text-gray-800 mb-4">Summary</h2>
          <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
            <div class="bg-blue-100 p-4 rounded-lg">
              <p class="text-lg font-medium text-blue-800">Total Spent</p>
              <p id="total-spent" class="text-2xl font-bold text-blue-900"></p>
            </div>
            <div class="bg-green-100 p-4 rounded-lg">
              <p class="text-lg font-medium text-green-800">Total Earned</p>
              <p id="total-earned" class="text-2xl font-bold text-green-900"></p>
            </div>
            <div class="bg-purple-100 p-4 rounded-lg">
              <p class="text-lg font-medium text-purple-800">Net Flow</p>
              <p id="net-flow" class="text-2xl font-bold text-purple-900"></p>
            </div>
            <div class="bg-yellow-100 p-4 rounded-lg">
              <p class="text-lg font-medium text-yellow-800">Purchases</p>
              <p id="purchase-count" class="text-2xl font-bold text-yellow-900"></p>
            </div>
            <div class="bg-red-100 p-4 rounded-lg">
              <p class="text-lg font-medium text-red-800">Sales</p>
              <p id="sale-count" class="text-2xl font-bold text-red-900"></p>
            </div>
            <div class="bg-teal-100 p-4 rounded-lg">
              <p class="text-lg font-medium text-teal-800">Most Purchased Item</p>
              <p id="most-purchased" class="text-xl font-bold text-teal-900"></p>
            </div>
          </div>
          <div class="mt-6 p-4 bg-indigo-100 rounded-lg">
            <p class="text-lg font-semibold text-indigo-800">Highest Transaction</p>
            <p id="highest-transaction" class="text-md text-indigo-900"></p>
          </div>
        </section>
        <section class="mb-8">
          <h2 class="text-2xl font-semibold text-gray-800 mb-4">Item Details</h2>
          <div class="mb-4">
            <label for="item-select" class="text-lg font-medium text-gray-700">Select Item:</label>
            <select id="item-select" class="ml-2 p-2 border rounded-lg">
              <option value="">-- Select an Item --</option>
            </select>
          </div>
          <div id="item-details" class="hidden bg-orange-100 p-4 rounded-lg">
            <p class="text-lg font-semibold text-orange-800 mb-2" id="item-name"></p>
            <table class="w-full text-left text-sm text-gray-700 mb-4">
              <thead>
                <tr class="bg-orange-200">
                  <th class="p-2">Metric</th>
                  <th class="p-2">Value</th>
                </tr>
              </thead>
              <tbody>
                <tr>
                  <td class="p-2">Transaction Count</td>
                  <td id="item-transaction-count" class="p-2"></td>
                </tr>
                <tr>
                  <td class="p-2">Total Value (€)</td>
                  <td id="item-total-eur" class="p-2"></td>
                </tr>
                <tr>
                  <td class="p-2">Purchases</td>
                  <td id="item-purchases" class="p-2"></td>
                </tr>
                <tr>
                  <td class="p-2">Sales</td>
                  <td id="item-sales" class="p-2"></td>
                </tr>
              </tbody>
            </table>
            <canvas id="item-pie-chart" class="bg-white p-4 rounded-lg shadow"></canvas>
          </div>
        </section>
        <section class="mb-8">
          <h2 class="text-2xl font-semibold text-gray-800 mb-4">Visualizations</h2>
          <div class="mb-8">
            <h3 class="text-xl font-medium text-gray-700 mb-2">Money Spent vs. Earned by Category</h3>
            <canvas id="bar-chart" class="bg-white p-4 rounded-lg shadow"></canvas>
          </div>
          <div class="mb-8">
            <h3 class="text-xl font-medium text-gray-700 mb-2">Transaction Volume Over Time</h3>
            <canvas id="line-chart" class="bg-white p-4 rounded-lg shadow"></canvas>
          </div>
          <div>
            <h3 class="text-xl font-medium text-gray-700 mb-2">Distribution of Transaction Types</h3>
            <canvas id="pie-chart" class="bg-white p-4 rounded-lg shadow"></canvas>
          </div>
        </section>
        <section>
          <h2 class="text-2xl font-semibold text-gray-800 mb-4">Conclusion</h2>
          <p id="conclusion" class="text-gray-700"></p>
        </section>
      </div>
    </div>
  </div>

  <script>
    let itemPieChart = null;

    async function loadData() {
      try {
        const [summary, barData, lineData, pieData] = await Promise.all([
          fetch("__DATA_DIR__/summary.json").then(res => res.json()),
          fetch("__DATA_DIR__/bar_data.json").then(res => res.json()),
          fetch("__DATA_DIR__/line_data.json").then(res => res.json()),
          fetch("__DATA_DIR__/pie_data.json").then(res => res.json())
        ]);

        // Hide loading and show content
        document.getElementById("loading").classList.add("hidden");
        document.getElementById("content").classList.remove("hidden");

        // Populate summary
        document.getElementById("total-spent").textContent = `€${summary.total_spent.toFixed(2)}`;
        document.getElementById("total-earned").textContent = `€${summary.total_earned.toFixed(2)}`;
        document.getElementById("net-flow").textContent = `€${summary.net_flow.toFixed(2)} ${summary.net_flow >= 0 ? "(Profit)" : "(Loss)"}`;
        document.getElementById("purchase-count").textContent = summary.purchase_count;
        document.getElementById("sale-count").textContent = summary.sale_count;
        document.getElementById("most-purchased").textContent = summary.most_purchased_item;
        document.getElementById("highest-transaction").textContent =
          `Your highest-value transaction was a ${summary.highest_transaction.type} of "${summary.highest_transaction.market_name}" for €${summary.highest_transaction.price_eur.toFixed(2)}!`;

        // Populate conclusion
        document.getElementById("conclusion").textContent =
          `This analysis reveals your trading activity in __GAME__. You spent €${summary.total_spent.toFixed(2)} and earned €${summary.total_earned.toFixed(2)}, resulting in a net ${summary.net_flow >= 0 ? "profit" : "loss"} of €${Math.abs(summary.net_flow).toFixed(2)}. Your most frequently purchased item was "${summary.most_purchased_item}", indicating a preference for these items. Use the dropdown below to explore detailed transaction data for each item.`;

        // Populate item dropdown
        const itemSelect = document.getElementById("item-select");
        summary.item_details.forEach(item => {
          const option = document.createElement("option");
          option.value = item["Market Name"];
          option.textContent = item["Market Name"];
          itemSelect.appendChild(option);
        });

        // Handle item selection
        itemSelect.addEventListener("change", () => {
          const selectedItem = itemSelect.value;
          const detailsDiv = document.getElementById("item-details");
          if (selectedItem) {
            const item = summary.item_details.find(i => i["Market Name"] === selectedItem);
            document.getElementById("item-name").textContent = item["Market Name"];
            document.getElementById("item-transaction-count").textContent = item.transaction_count;
            document.getElementById("item-total-eur").textContent = `€${item.total_eur.toFixed(2)}`;
            document.getElementById("item-purchases").textContent = item.type_breakdown.purchase || 0;
            document.getElementById("item-sales").textContent = item.type_breakdown.sale || 0;
            detailsDiv.classList.remove("hidden");

            // Update item-specific pie chart
            if (itemPieChart) itemPieChart.destroy();
            const itemTrades = (item.type_breakdown.purchase || 0) + (item.type_breakdown.sale || 0);
            itemPieChart = new Chart(document.getElementById("item-pie-chart"), {
              type: "pie",
              data: {
                labels: ["Purchases", "Sales"],
                datasets: [{
                  data: [item.type_breakdown.purchase || 0, item.type_breakdown.sale || 0],
                  backgroundColor: ["#F59E0B", "#EC4899"]
                }]
              },
              options: {
                responsive: true,
                plugins: {
                  legend: { position: "top" },
                  tooltip: {
                    callbacks: {
                      label: ctx => `${ctx.label}: ${ctx.raw} (${((ctx.raw / itemTrades) * 100).toFixed(1)}%)`
                    }
                  }
                }
              }
            });
          } else {
            detailsDiv.classList.add("hidden");
          }
        });

        // Render bar chart
        new Chart(document.getElementById("bar-chart"), {
          type: "bar",
          data: {
            labels: barData.map(d => d.Category),
            datasets: [
              {
                label: "Spent (€)",
                data: barData.map(d => d.spent),
                backgroundColor: "#3B82F6"
              },
              {
                label: "Earned (€)",
                data: barData.map(d => d.earned),
                backgroundColor: "#10B981"
              }
            ]
          },
          options: {
            responsive: true,
            scales: {
              y: { beginAtZero: true, title: { display: true, text: "Amount (€)" } }
            }
          }
        });

        // Render line chart
        const palette = ["#3B82F6", "#10B981", "#F59E0B", "#EC4899", "#8B5CF6", "#EF4444", "#14B8A6", "#F97316"];
        const uniqueDates = [...new Set(lineData.map(d => d.Date))];
        const marketNames = [...new Set(lineData.map(d => d["Market Name"]))];
        const datasets = marketNames.map((name, i) => ({
          label: name,
          data: uniqueDates.map(date => {
            const entry = lineData.find(d => d.Date === date && d["Market Name"] === name);
            return entry ? entry.count : 0;
          }),
          borderColor: palette[i % palette.length],
          fill: false
        }));
        new Chart(document.getElementById("line-chart"), {
          type: "line",
          data: {
            labels: uniqueDates,
            datasets: datasets
          },
          options: {
            responsive: true,
            scales: {
              y: { beginAtZero: true, title: { display: true, text: "Transaction Count" } }
            }
          }
        });

        // Render pie chart
        new Chart(document.getElementById("pie-chart"), {
          type: "pie",
          data: {
            labels: pieData.map(d => d.name),
            datasets: [{
              data: pieData.map(d => d.value),
              backgroundColor: ["#F59E0B", "#EC4899"]
            }]
          },
          options: {
            responsive: true,
            plugins: {
              legend: { position: "top" },
              tooltip: {
                callbacks: {
                  label: ctx => `${ctx.label}: ${ctx.raw} (${((ctx.raw / pieData.reduce((a, b) => a + b.value, 0)) * 100).toFixed(1)}%)`
                }
              }
            }
          }
        });
      } catch (error) {
        console.error("Error loading data:", error);
        document.getElementById("loading").textContent = "Error loading data. Please check the console.";
      }
    }

    // Initialize
    loadData();
  </script>
</body>
</html>
"##;

/// Fills the template for `game`, pointing its fetches at `data_dir`.
fn render(game: &str, data_dir: &Path) -> String {
    TEMPLATE
        .replace("__GAME__", game)
        .replace("__DATA_DIR__", &data_dir.display().to_string())
}

pub fn write_page(path: &Path, game: &str, data_dir: &Path) -> Result<()> {
    fs::write(path, render(game, data_dir))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote dashboard page to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_every_token() {
        let page = render("Counter-Strike 2", Path::new("output"));

        assert!(page.contains("<h1 class=\"text-3xl font-bold text-blue-800 mb-6 text-center\">Counter-Strike 2 Market Transaction Analysis</h1>"));
        assert!(page.contains("fetch(\"output/summary.json\")"));
        assert!(page.contains("fetch(\"output/pie_data.json\")"));
        assert!(!page.contains("__GAME__"));
        assert!(!page.contains("__DATA_DIR__"));
    }

    #[test]
    fn line_chart_colors_are_deterministic() {
        let page = render("Counter-Strike 2", Path::new("output"));

        assert!(page.contains("palette[i % palette.length]"));
        assert!(!page.contains("Math.random"));
    }
}
